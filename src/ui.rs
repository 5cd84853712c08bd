use anyhow::Result;
use console::{Style, Term};
use zeroize::Zeroizing;

pub struct DisplayOptions {
    pub unicode_support: bool,
    pub color_support: bool,
}

impl DisplayOptions {
    pub fn detect() -> Self {
        Self {
            unicode_support: detect_unicode_support(),
            color_support: detect_color_support(),
        }
    }
}

pub fn detect_unicode_support() -> bool {
    supports_unicode::on(supports_unicode::Stream::Stderr)
}

pub fn detect_color_support() -> bool {
    supports_color::on(supports_color::Stream::Stderr).is_some()
}

pub fn get_status_symbols(unicode_support: bool) -> (&'static str, &'static str) {
    if unicode_support {
        ("✓", "!")
    } else {
        ("+", "!")
    }
}

fn style(color_support: bool, style: Style) -> Style {
    if color_support { style } else { Style::new() }
}

/// Writes the password to stdout, alone on its line.
pub fn display_password(password: &Zeroizing<String>) -> Result<()> {
    Term::stdout().write_line(password)?;
    Ok(())
}

pub fn display_copied(tool: &str, options: &DisplayOptions) -> Result<()> {
    let (check_ok, _) = get_status_symbols(options.unicode_support);
    let ok_style = style(options.color_support, Style::new().green());

    Term::stderr().write_line(&format!(
        "{} Copied to clipboard via {}",
        ok_style.apply_to(format!("[{}]", check_ok)),
        tool
    ))?;
    Ok(())
}

pub fn format_error(err: &anyhow::Error, options: &DisplayOptions) -> String {
    let error_style = style(options.color_support, Style::new().red().bold());
    format!("{} {:#}", error_style.apply_to("error:"), err)
}

pub fn display_error(err: &anyhow::Error, options: &DisplayOptions) {
    eprintln!("{}", format_error(err, options));
}
