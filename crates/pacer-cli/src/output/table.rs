//! Plain aligned tables for terminal output.

/// Column widths never shrink below this when fitting to the terminal.
const MIN_COLUMN_WIDTH: usize = 6;
const SEPARATOR: &str = "  ";

#[derive(Clone, Copy, Debug)]
pub struct TableOptions {
    pub max_width: Option<usize>,
    pub color: bool,
}

/// Column headers plus string rows. Missing cells render as `-`.
#[derive(Debug, Default)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[must_use]
    pub fn render(&self, options: TableOptions) -> String {
        let mut widths = self.natural_widths();
        if let Some(max) = options.max_width {
            shrink_to_fit(&mut widths, max);
        }

        let header = self
            .headers
            .iter()
            .zip(&widths)
            .map(|(h, &w)| pad(&truncate(h, w), w, false))
            .collect::<Vec<_>>()
            .join(SEPARATOR);
        let divider = "-".repeat(header.chars().count());

        let mut lines = Vec::with_capacity(self.rows.len() + 2);
        lines.push(header);
        lines.push(divider);
        for row in &self.rows {
            let cells = widths.iter().enumerate().map(|(index, &width)| {
                let value = row.get(index).map_or("-", String::as_str);
                let text = truncate(value, width);
                let padded = pad(&text, width, looks_numeric(&text));
                if options.color {
                    colorize(&text, padded)
                } else {
                    padded
                }
            });
            lines.push(cells.collect::<Vec<_>>().join(SEPARATOR));
        }
        lines.join("\n")
    }

    fn natural_widths(&self) -> Vec<usize> {
        self.headers
            .iter()
            .enumerate()
            .map(|(index, header)| {
                self.rows
                    .iter()
                    .filter_map(|row| row.get(index))
                    .map(|cell| cell.chars().count())
                    .chain(std::iter::once(header.chars().count()))
                    .max()
                    .unwrap_or(0)
                    .max(MIN_COLUMN_WIDTH)
            })
            .collect()
    }
}

/// Narrow the widest column one step at a time until the row fits.
fn shrink_to_fit(widths: &mut [usize], max_width: usize) {
    let separators = widths.len().saturating_sub(1) * SEPARATOR.len();
    while widths.iter().sum::<usize>() + separators > max_width {
        let Some(widest) = widths
            .iter_mut()
            .filter(|w| **w > MIN_COLUMN_WIDTH)
            .max_by_key(|w| **w)
        else {
            break;
        };
        *widest -= 1;
    }
}

fn truncate(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    let mut out: String = value.chars().take(width.saturating_sub(1)).collect();
    out.push('…');
    out
}

fn pad(value: &str, width: usize, right_align: bool) -> String {
    let fill = " ".repeat(width.saturating_sub(value.chars().count()));
    if right_align {
        format!("{fill}{value}")
    } else {
        format!("{value}{fill}")
    }
}

fn looks_numeric(value: &str) -> bool {
    let trimmed = value.trim();
    !trimmed.is_empty() && trimmed.chars().all(|ch| ch.is_ascii_digit() || matches!(ch, '-' | '.'))
        && trimmed.chars().any(|ch| ch.is_ascii_digit())
}

/// Wrap a padded cell in an ANSI color chosen from its bare text.
fn colorize(text: &str, padded: String) -> String {
    let code = match text {
        "done" | "ranked" | "cache_hit" | "true" => "32",
        "active" | "medium" | "skipped" => "33",
        "high" | "failed" | "false" => "31",
        _ => return padded,
    };
    format!("\u{1b}[{code}m{padded}\u{1b}[0m")
}
