use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ContentArrangement, Table, TableComponent,
    modifiers::UTF8_SOLID_INNER_BORDERS, presets::UTF8_FULL,
};

use crate::error::AppError;

/// Language code, digit group separator, decimal separator
const LOCALES: &[(&str, char, char)] = &[
    ("en", ',', '.'),
    ("zh", ',', '.'),
    ("de", '.', ','),
    ("fr", ' ', ','),
    ("ru", ' ', ','),
];

/// Separators used when printing numbers in the summary tables
#[derive(Debug, Clone, Copy)]
pub(crate) struct NumberFormat {
    group_sep: char,
    decimal_sep: char,
}

impl Default for NumberFormat {
    fn default() -> Self {
        NumberFormat {
            group_sep: ',',
            decimal_sep: '.',
        }
    }
}

impl NumberFormat {
    /// Resolve `de`, `de-DE` or `de_DE` style tags; blank means the default
    pub(crate) fn from_locale(locale: Option<&str>) -> Result<Self, AppError> {
        let tag = locale.map(str::trim).unwrap_or_default();
        if tag.is_empty() {
            return Ok(NumberFormat::default());
        }
        let language = tag.split(['-', '_']).next().unwrap_or(tag);
        LOCALES
            .iter()
            .find(|(code, _, _)| code.eq_ignore_ascii_case(language))
            .map(|&(_, group_sep, decimal_sep)| NumberFormat {
                group_sep,
                decimal_sep,
            })
            .ok_or_else(|| AppError::UnsupportedLocale {
                input: tag.to_string(),
            })
    }

    /// Whole number with digit grouping: `1234567` -> `1,234,567`
    pub(super) fn integer(self, n: i64) -> String {
        let digits = n.unsigned_abs().to_string();
        let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
        if n < 0 {
            out.push('-');
        }
        for (idx, digit) in digits.chars().enumerate() {
            if idx > 0 && (digits.len() - idx) % 3 == 0 {
                out.push(self.group_sep);
            }
            out.push(digit);
        }
        out
    }

    /// Token counts with a K, M or B suffix and one decimal
    pub(super) fn compact(self, n: i64) -> String {
        const UNITS: [(f64, &str); 3] = [(1e9, "B"), (1e6, "M"), (1e3, "K")];
        let value = n.unsigned_abs() as f64;
        let sign = if n < 0 { "-" } else { "" };
        match UNITS.iter().find(|(scale, _)| value >= *scale) {
            Some((scale, suffix)) => {
                format!("{sign}{}{suffix}", self.decimal(value / scale, 1))
            }
            None => n.to_string(),
        }
    }

    /// US dollars with two decimals
    pub(super) fn cost(self, usd: f64) -> String {
        format!("${}", self.decimal(usd, 2))
    }

    fn decimal(self, value: f64, places: usize) -> String {
        let text = format!("{value:.places$}");
        if self.decimal_sep == '.' {
            text
        } else {
            text.replace('.', &self.decimal_sep.to_string())
        }
    }
}

/// Rounded table with single-line inner borders and header rule
pub(super) fn summary_table(headers: &[&str], use_color: bool) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_style(TableComponent::HeaderLines, '─');
    table.set_style(TableComponent::LeftHeaderIntersection, '├');
    table.set_style(TableComponent::MiddleHeaderIntersections, '┼');
    table.set_style(TableComponent::RightHeaderIntersection, '┤');

    table.set_header(headers.iter().map(|text| {
        let cell = Cell::new(text).add_attribute(Attribute::Bold);
        if use_color { cell.fg(Color::Cyan) } else { cell }
    }));
    table
}

pub(super) fn cell(text: &str, color: Option<Color>, bold: bool) -> Cell {
    let mut cell = Cell::new(text);
    if let Some(color) = color {
        cell = cell.fg(color);
    }
    if bold {
        cell = cell.add_attribute(Attribute::Bold);
    }
    cell
}

pub(super) fn number_cell(text: &str, color: Option<Color>, bold: bool) -> Cell {
    cell(text, color, bold).set_alignment(CellAlignment::Right)
}
