//! Listings of loans, trips, vehicle costs, savings and categorized expenses

use super::table::{format_table, Align};
use crate::models::{CategorizedExpense, Loan, Money, SavingsTransaction, Trip, VehicleExpense};
use crate::stats::{
    categorized_total, loan_amounts, loan_position, savings_position, trip_total, travel_total,
    vehicle_breakdown,
};

/// Format loans with paid and remaining amounts
pub fn format_loan_list(loans: &[Loan], symbol: &str) -> String {
    if loans.is_empty() {
        return "Nenhum empréstimo cadastrado.".to_string();
    }
    let fmt = |m: Money| m.format_with_symbol(symbol);

    let mut rows: Vec<Option<Vec<String>>> = loans
        .iter()
        .map(|loan| {
            let amounts = loan_amounts(loan);
            Some(vec![
                loan.id.to_string(),
                loan.description.clone(),
                format!("{}/{}", loan.paid_installments, loan.installments),
                fmt(loan.installment_value),
                fmt(loan.total_value),
                format!("{:.2}%", loan.interest_monthly),
                fmt(amounts.paid),
                fmt(amounts.remaining),
            ])
        })
        .collect();

    let position = loan_position(loans);
    rows.push(None);
    rows.push(Some(vec![
        "TOTAL".into(),
        String::new(),
        String::new(),
        String::new(),
        fmt(loans.iter().map(|l| l.total_value).sum()),
        String::new(),
        fmt(position.paid),
        fmt(position.remaining),
    ]));

    format_table(
        &[
            ("ID", Align::Left),
            ("Descrição", Align::Left),
            ("Pagas", Align::Right),
            ("Parcela", Align::Right),
            ("Contratado", Align::Right),
            ("Juros", Align::Right),
            ("Pago", Align::Right),
            ("Restante", Align::Right),
        ],
        &rows,
    )
}

/// Format trips with every cost field and their totals
pub fn format_trip_list(trips: &[Trip], symbol: &str) -> String {
    if trips.is_empty() {
        return "Nenhuma viagem cadastrada.".to_string();
    }
    let fmt = |m: Money| m.format_with_symbol(symbol);

    let mut rows: Vec<Option<Vec<String>>> = trips
        .iter()
        .map(|trip| {
            let mut row = vec![
                trip.id.to_string(),
                trip.destination.clone(),
                trip.month.to_string(),
            ];
            row.extend(trip.costs().iter().map(|(_, value)| fmt(*value)));
            row.push(fmt(trip_total(trip)));
            Some(row)
        })
        .collect();

    rows.push(None);
    let mut total_row = vec!["TOTAL".to_string()];
    total_row.resize(9, String::new());
    total_row.push(fmt(travel_total(trips)));
    rows.push(Some(total_row));

    format_table(
        &[
            ("ID", Align::Left),
            ("Destino", Align::Left),
            ("Mês", Align::Left),
            ("Aluguel", Align::Right),
            ("Combustível", Align::Right),
            ("Alimentação", Align::Right),
            ("Outros", Align::Right),
            ("Cartão", Align::Right),
            ("Pix", Align::Right),
            ("Total", Align::Right),
        ],
        &rows,
    )
}

/// Format vehicle expenses followed by the per-vehicle breakdown
pub fn format_vehicle_list(expenses: &[VehicleExpense], symbol: &str) -> String {
    if expenses.is_empty() {
        return "Nenhum gasto com veículos cadastrado.".to_string();
    }
    let fmt = |m: Money| m.format_with_symbol(symbol);

    let rows: Vec<Option<Vec<String>>> = expenses
        .iter()
        .map(|e| {
            Some(vec![
                e.id.to_string(),
                e.vehicle.to_string(),
                e.category.to_string(),
                e.month.to_string(),
                e.description.clone(),
                fmt(e.value),
            ])
        })
        .collect();

    let mut output = format_table(
        &[
            ("ID", Align::Left),
            ("Veículo", Align::Left),
            ("Categoria", Align::Left),
            ("Mês", Align::Left),
            ("Descrição", Align::Left),
            ("Valor", Align::Right),
        ],
        &rows,
    );

    let breakdown = vehicle_breakdown(expenses);
    output.push('\n');
    output.push_str(&format_table(
        &[
            ("", Align::Left),
            ("Combustível", Align::Right),
            ("Manutenção", Align::Right),
            ("Total", Align::Right),
        ],
        &[
            Some(vec![
                "Carro".into(),
                fmt(breakdown.car.fuel),
                fmt(breakdown.car.maintenance),
                fmt(breakdown.car.total()),
            ]),
            Some(vec![
                "Moto".into(),
                fmt(breakdown.moto.fuel),
                fmt(breakdown.moto.maintenance),
                fmt(breakdown.moto.total()),
            ]),
            None,
            Some(vec![
                "TOTAL".into(),
                String::new(),
                String::new(),
                fmt(breakdown.total()),
            ]),
        ],
    ));
    output
}

/// Format savings movements followed by the balance and yields
pub fn format_savings_list(transactions: &[SavingsTransaction], symbol: &str) -> String {
    if transactions.is_empty() {
        return "Nenhuma movimentação na poupança.".to_string();
    }
    let fmt = |m: Money| m.format_with_symbol(symbol);

    let rows: Vec<Option<Vec<String>>> = transactions
        .iter()
        .map(|t| {
            Some(vec![
                t.id.to_string(),
                t.kind.to_string(),
                t.month.to_string(),
                t.description.clone(),
                fmt(t.signed_value()),
            ])
        })
        .collect();

    let position = savings_position(transactions);
    let mut output = format_table(
        &[
            ("ID", Align::Left),
            ("Tipo", Align::Left),
            ("Mês", Align::Left),
            ("Descrição", Align::Left),
            ("Valor", Align::Right),
        ],
        &rows,
    );
    output.push_str(&format!("\nSaldo da poupança: {}\n", fmt(position.total)));
    output.push_str(&format!("Rendimentos:       {}\n", fmt(position.earnings)));
    output
}

/// Format categorized expenses with their total
pub fn format_categorized_list(expenses: &[CategorizedExpense], symbol: &str) -> String {
    if expenses.is_empty() {
        return "Nenhum gasto categorizado cadastrado.".to_string();
    }
    let fmt = |m: Money| m.format_with_symbol(symbol);

    let mut rows: Vec<Option<Vec<String>>> = expenses
        .iter()
        .map(|e| {
            Some(vec![
                e.id.to_string(),
                e.category.clone(),
                e.month.to_string(),
                e.description.clone(),
                fmt(e.value),
            ])
        })
        .collect();
    rows.push(None);
    rows.push(Some(vec![
        "TOTAL".into(),
        String::new(),
        String::new(),
        String::new(),
        fmt(categorized_total(expenses)),
    ]));

    format_table(
        &[
            ("ID", Align::Left),
            ("Categoria", Align::Left),
            ("Mês", Align::Left),
            ("Descrição", Align::Left),
            ("Valor", Align::Right),
        ],
        &rows,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MonthName, MonthRef, SavingsKind, VehicleType};

    #[test]
    fn test_empty_lists() {
        assert!(format_loan_list(&[], "R$").starts_with("Nenhum"));
        assert!(format_trip_list(&[], "R$").starts_with("Nenhuma"));
        assert!(format_vehicle_list(&[], "R$").starts_with("Nenhum"));
        assert!(format_savings_list(&[], "R$").starts_with("Nenhuma"));
        assert!(format_categorized_list(&[], "R$").starts_with("Nenhum"));
    }

    #[test]
    fn test_loan_list_shows_contracted_and_remaining() {
        let mut loan = Loan::new("Moto");
        loan.total_value = Money::from_cents(1_000_000);
        loan.installments = 10;
        loan.paid_installments = 2;
        loan.installment_value = Money::from_cents(110_000);

        let list = format_loan_list(&[loan], "R$");
        assert!(list.contains("2/10"));
        assert!(list.contains("R$ 10.000,00"));
        assert!(list.contains("R$ 8.800,00"));
    }

    #[test]
    fn test_vehicle_breakdown_in_listing() {
        let mut fuel = VehicleExpense::new(VehicleType::Car);
        fuel.value = Money::from_cents(20000);
        let list = format_vehicle_list(&[fuel], "R$");
        assert!(list.contains("Combustível"));
        assert!(list.contains("R$ 200,00"));
    }

    #[test]
    fn test_savings_listing_signs_withdrawals() {
        let mut out = SavingsTransaction::new(SavingsKind::Withdrawal);
        out.value = Money::from_cents(5000);
        let list = format_savings_list(&[out], "R$");
        assert!(list.contains("-R$ 50,00"));
    }

    #[test]
    fn test_categorized_listing_total() {
        let mut e = CategorizedExpense::new(MonthRef::unlinked(MonthName::Maio));
        e.value = Money::from_cents(1234);
        let list = format_categorized_list(&[e.clone(), e], "R$");
        assert!(list.contains("R$ 24,68"));
    }
}
