//! ASCII art banner for reviewdeck CLI

use colored::Colorize;

const LOGO: &str = r#"
 ┬─┐┌─┐┬  ┬┬┌─┐┬ ┬  ┌┬┐┌─┐┌─┐┬┌─
 ├┬┘├┤ └┐┌┘│├┤ │││   ││├┤ │  ├┴┐
 ┴└─└─┘ └┘ ┴└─┘└┴┘  ─┴┘└─┘└─┘┴ ┴"#;

/// Print the reviewdeck ASCII art banner
pub fn print_banner() {
    for line in LOGO.lines() {
        println!("{}", line.bold());
    }
}

/// Print the banner with version info
pub fn print_banner_with_version() {
    print_banner();
    println!(
        " {} {}",
        "Review & checklist co-pilot".dimmed(),
        format!("v{}", env!("CARGO_PKG_VERSION")).dimmed(),
    );
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logo_has_three_lines() {
        let lines: Vec<&str> = LOGO.lines().filter(|l| !l.is_empty()).collect();
        assert_eq!(lines.len(), 3, "Logo should have 3 lines of box-drawing letters");
    }
}
