use domain::User;

const HEADERS: [&str; 3] = ["id", "name", "email"];

/// Renders rows as a plain-text table, one line per user.
pub fn render_table(users: &[User]) -> String {
    let rows: Vec<[String; 3]> = users
        .iter()
        .map(|user| [user.id.to_string(), user.name.clone(), user.email.clone()])
        .collect();

    let mut widths = HEADERS.map(|header| header.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let separator = format!(
        "+{}+\n",
        widths
            .iter()
            .map(|width| "-".repeat(width + 2))
            .collect::<Vec<_>>()
            .join("+")
    );

    let mut table = separator.clone();
    table.push_str(&line(&HEADERS.map(str::to_owned), &widths));
    table.push_str(&separator);
    for row in &rows {
        table.push_str(&line(row, &widths));
    }
    table.push_str(&separator);

    table
}

fn line(cells: &[String; 3], widths: &[usize; 3]) -> String {
    let cells: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!(" {cell:<width$} "))
        .collect();

    format!("|{}|\n", cells.join("|"))
}
