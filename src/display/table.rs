//! Plain column layout for record listings

/// Horizontal alignment of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

/// Lay out rows under headers, sizing each column to its widest cell
///
/// A `None` row draws a separator line.
pub fn format_table(columns: &[(&str, Align)], rows: &[Option<Vec<String>>]) -> String {
    let mut widths: Vec<usize> = columns.iter().map(|(h, _)| h.chars().count()).collect();
    for row in rows.iter().flatten() {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let rule = widths
        .iter()
        .map(|w| "-".repeat(*w))
        .collect::<Vec<_>>()
        .join("  ");

    let mut output = render_line(columns.iter().map(|(h, _)| *h), columns, &widths);
    output.push_str(&rule);
    output.push('\n');
    for row in rows {
        match row {
            Some(cells) => output.push_str(&render_line(cells.iter().map(String::as_str), columns, &widths)),
            None => {
                output.push_str(&rule);
                output.push('\n');
            }
        }
    }
    output
}

fn render_line<'a>(
    cells: impl Iterator<Item = &'a str>,
    columns: &[(&str, Align)],
    widths: &[usize],
) -> String {
    let line: Vec<String> = cells
        .zip(columns.iter().zip(widths))
        .map(|(cell, ((_, align), width))| match align {
            Align::Left => format!("{:<width$}", cell, width = *width),
            Align::Right => format!("{:>width$}", cell, width = *width),
        })
        .collect();
    format!("{}\n", line.join("  ").trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_columns_fit_widest_cell() {
        let table = format_table(
            &[("Mês", Align::Left), ("Valor", Align::Right)],
            &[
                Some(vec!["Março".into(), "R$ 1,00".into()]),
                None,
                Some(vec!["Total".into(), "R$ 10,00".into()]),
            ],
        );
        let lines: Vec<_> = table.lines().collect();
        assert_eq!(lines[0], "Mês       Valor");
        assert_eq!(lines[1], "-----  --------");
        assert_eq!(lines[2], "Março   R$ 1,00");
        assert_eq!(lines[4], "Total  R$ 10,00");
    }
}
