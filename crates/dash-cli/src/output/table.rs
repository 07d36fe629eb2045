#[derive(Clone, Copy, Debug)]
pub struct TableOptions {
    pub max_width: Option<usize>,
    pub color: bool,
}

/// Render a simple aligned table for string rows.
///
/// Widths are measured in terminal columns, so Hangul company and unit
/// labels line up with ASCII ones.
#[must_use]
pub fn render_table(headers: &[&str], rows: &[Vec<String>], options: TableOptions) -> String {
    let mut widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(index, header)| {
            rows.iter()
                .filter_map(|row| row.get(index))
                .map(|cell| display_width(cell))
                .max()
                .unwrap_or(0)
                .max(display_width(header))
                .max(4)
        })
        .collect();

    fit_widths(&mut widths, headers, options.max_width);

    let header_line = headers
        .iter()
        .zip(widths.iter())
        .map(|(header, width)| {
            let text = truncate_text(header, *width);
            pad_cell(&text, *width, false)
        })
        .collect::<Vec<_>>()
        .join("  ");

    let divider = "-".repeat(display_width(header_line.trim_end()));

    let row_lines = rows
        .iter()
        .map(|row| {
            widths
                .iter()
                .enumerate()
                .map(|(index, width)| {
                    let value = row.get(index).cloned().unwrap_or_else(|| "-".to_string());
                    let truncated = truncate_text(&value, *width);
                    let padded = pad_cell(&truncated, *width, looks_numeric(&truncated));
                    if options.color {
                        colorize_value(&truncated, padded)
                    } else {
                        padded
                    }
                })
                .collect::<Vec<_>>()
                .join("  ")
        })
        .collect::<Vec<_>>();

    let mut lines = Vec::with_capacity(2 + row_lines.len());
    lines.push(header_line.trim_end().to_string());
    lines.push(divider);
    lines.extend(row_lines.into_iter().map(|line| line.trim_end().to_string()));
    lines.join("\n")
}

fn fit_widths(widths: &mut [usize], headers: &[&str], max_width: Option<usize>) {
    let Some(max_width) = max_width else {
        return;
    };

    if widths.is_empty() {
        return;
    }

    let separators = widths.len().saturating_sub(1) * 2;
    let mut total = widths.iter().sum::<usize>() + separators;

    while total > max_width {
        let mut candidate_idx = None;
        let mut candidate_width = 0usize;
        for (idx, width) in widths.iter().enumerate() {
            let min_width = display_width(headers[idx]).max(4);
            if *width > min_width && *width > candidate_width {
                candidate_idx = Some(idx);
                candidate_width = *width;
            }
        }

        let Some(idx) = candidate_idx else {
            break;
        };

        widths[idx] = widths[idx].saturating_sub(1);
        total = widths.iter().sum::<usize>() + separators;
    }
}

/// Terminal columns taken by `value`; Hangul and other wide CJK characters
/// take two.
pub fn display_width(value: &str) -> usize {
    value.chars().map(char_width).sum()
}

fn char_width(ch: char) -> usize {
    match u32::from(ch) {
        0x1100..=0x115F | 0x2E80..=0xA4CF | 0xAC00..=0xD7A3 | 0xF900..=0xFAFF | 0xFF00..=0xFF60 => 2,
        _ => 1,
    }
}

fn truncate_text(value: &str, width: usize) -> String {
    if display_width(value) <= width {
        return value.to_string();
    }
    if width <= 1 {
        return "…".to_string();
    }

    let mut out = String::new();
    let mut used = 0;
    for ch in value.chars() {
        let w = char_width(ch);
        if used + w > width - 1 {
            break;
        }
        used += w;
        out.push(ch);
    }
    out.push('…');
    out
}

/// Formatted numbers start with a digit, optionally signed.
fn looks_numeric(value: &str) -> bool {
    let trimmed = value.trim().trim_start_matches(['-', '+']);
    trimmed.chars().next().is_some_and(|ch| ch.is_ascii_digit())
}

fn pad_cell(value: &str, width: usize, numeric: bool) -> String {
    let pad = width.saturating_sub(display_width(value));
    if numeric {
        format!("{}{}", " ".repeat(pad), value)
    } else {
        format!("{}{}", value, " ".repeat(pad))
    }
}

/// Red for losses, yellow for values that are not applicable.
fn colorize_value(value: &str, padded: String) -> String {
    let trimmed = value.trim();
    let code = if trimmed == super::format::NOT_APPLICABLE {
        Some("33")
    } else if trimmed.starts_with('-') && looks_numeric(trimmed) {
        Some("31")
    } else {
        None
    };

    match code {
        Some(code) => format!("\u{1b}[{code}m{padded}\u{1b}[0m"),
        None => padded,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLAIN: TableOptions = TableOptions {
        max_width: None,
        color: false,
    };

    #[test]
    fn table_alignment_handles_mixed_widths() {
        let headers = ["entity", "Revenue"];
        let rows = vec![
            vec!["Krafton".to_string(), "8,706억원".to_string()],
            vec!["Pearl Abyss".to_string(), "1,068억원".to_string()],
        ];

        let table = render_table(&headers, &rows, PLAIN);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("entity"));
        assert!(lines[1].chars().all(|c| c == '-'));
        assert_eq!(display_width(lines[2]), display_width(lines[3]));
    }

    #[test]
    fn numbers_are_right_aligned() {
        let rows = vec![vec!["755억원".to_string()], vec!["8,706억원".to_string()]];
        let table = render_table(&["Revenue"], &rows, PLAIN);
        let lines: Vec<&str> = table.lines().collect();
        assert!(lines[2].starts_with("  755"));
    }

    #[test]
    fn hangul_counts_double() {
        assert_eq!(display_width("억원"), 4);
        assert_eq!(display_width("OP"), 2);
    }

    #[test]
    fn narrow_terminal_truncates_widest_column() {
        let rows = vec![vec![
            "Shift Up quarterly results".to_string(),
            "65.6%".to_string(),
        ]];
        let table = render_table(
            &["title", "OPM"],
            &rows,
            TableOptions {
                max_width: Some(20),
                color: false,
            },
        );
        assert!(table.contains('…'));
        assert!(table.lines().all(|line| display_width(line) <= 20));
    }

    #[test]
    fn color_marks_losses_and_not_applicable() {
        let rows = vec![vec!["-1,092억원".to_string()], vec!["N/A".to_string()]];
        let table = render_table(
            &["OP"],
            &rows,
            TableOptions {
                max_width: None,
                color: true,
            },
        );
        assert!(table.contains("\u{1b}[31m"));
        assert!(table.contains("\u{1b}[33m"));
    }
}
