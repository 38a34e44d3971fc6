use crate::ui::{theme, Icons};
use owo_colors::OwoColorize;

/// Widest bar drawn by [`bar`]
const BAR_WIDTH: usize = 40;

pub fn banner(title: &str, subtitle: &str) {
    println!("{} {}", Icons::STAR, title.style(theme().header.clone()));
    println!("   {}", subtitle.style(theme().dim.clone()));
}

pub fn header(icon: &str, text: &str) {
    println!();
    println!("{} {}", icon, text.style(theme().header.clone()));
}

pub fn success(label: &str) {
    println!("{} {}", Icons::CHECK, label.style(theme().success.clone()));
}

pub fn error(label: &str) {
    eprintln!("{} {}", Icons::CROSS, label.style(theme().error.clone()));
}

pub fn warn(label: &str) {
    eprintln!("{} {}", Icons::WARN, label.style(theme().warn.clone()));
}

pub fn info(label: &str, value: &str) {
    println!("{} {}: {}", Icons::INFO, label.style(theme().dim.clone()), value);
}

pub fn section(title: &str) {
    println!();
    println!("━ {} ━", title.style(theme().header.clone()));
}

pub fn dim(text: &str) -> String {
    text.style(theme().dim.clone()).to_string()
}

pub fn summary_row(label: &str, value: &str) {
    println!("  {} {}", label.style(theme().dim.clone()), value);
}

/// One labelled horizontal bar, scaled against `max`
pub fn bar(label: &str, value: i64, max: i64) {
    println!("  {:<12} {} {}", label, render_bar(value, max).style(theme().highlight.clone()), value);
}

fn render_bar(value: i64, max: i64) -> String {
    if max <= 0 || value <= 0 {
        return String::new();
    }
    let width = ((value.min(max) as f64 / max as f64) * BAR_WIDTH as f64).round() as usize;
    "█".repeat(width.max(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_bar_scales() {
        assert_eq!(render_bar(0, 10), "");
        assert_eq!(render_bar(5, 0), "");
        assert_eq!(render_bar(10, 10).chars().count(), BAR_WIDTH);
        assert_eq!(render_bar(5, 10).chars().count(), BAR_WIDTH / 2);
        assert_eq!(render_bar(1, 1000).chars().count(), 1);
    }
}
