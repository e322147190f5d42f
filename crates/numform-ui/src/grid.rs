//! Column layout for result sets.

/// Lay `items` out in as many left-aligned columns as fit in `width`,
/// filling row by row. Columns are separated by two spaces.
pub fn render_grid(items: &[String], width: usize) -> Vec<String> {
    let Some(cell) = items.iter().map(|s| s.chars().count()).max() else {
        return Vec::new();
    };
    let columns = ((width + 2) / (cell + 2)).max(1);

    items
        .chunks(columns)
        .map(|row| {
            row.iter()
                .map(|item| format!("{item:<cell$}"))
                .collect::<Vec<_>>()
                .join("  ")
                .trim_end()
                .to_string()
        })
        .collect()
}
