pub mod day;
pub mod month;
pub mod roster;
pub mod week;

/// Fits `text` into `width` columns, marking cut text with an ellipsis.
pub(crate) fn fit(text: &str, width: usize) -> String {
    let count = text.chars().count();
    if count > width && width > 0 {
        let mut cut: String = text.chars().take(width - 1).collect();
        cut.push('…');
        cut
    } else {
        format!("{:<width$}", text, width = width)
    }
}
