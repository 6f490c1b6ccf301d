const ELLIPSIS: &str = "...";

pub fn truncate_left(s: &str, max_width: usize) -> String {
    let len = s.chars().count();
    if len <= max_width {
        return s.to_string();
    }
    if max_width <= ELLIPSIS.len() {
        return ELLIPSIS[..max_width].to_string();
    }

    let keep = max_width - ELLIPSIS.len();
    let mut out = String::with_capacity(max_width + ELLIPSIS.len());
    out.push_str(ELLIPSIS);
    out.extend(s.chars().skip(len - keep));
    out
}

pub fn percent_text(percent: f64, width: usize, precision: usize) -> String {
    format!("{percent:width$.precision$}%")
}
