use super::theme::dashboard_skin;
use moveminute_core::ActivityEntry;
use termimad::MadSkin;

const TABLE_HEADINGS: [&str; 5] = [
    "Date",
    "Activity",
    "Duration (min)",
    "Distance (mi)",
    "Notes",
];

#[derive(Clone)]
pub struct RenderOptions {
    pub date_format: String,
    pub use_color: bool,
}

pub struct Renderer {
    skin: MadSkin,
    opts: RenderOptions,
}

impl Renderer {
    pub fn new(opts: Option<RenderOptions>) -> Self {
        Self {
            skin: dashboard_skin(),
            opts: opts.unwrap_or(RenderOptions {
                date_format: "%Y-%m-%d".to_string(),
                use_color: true,
            }),
        }
    }

    pub fn print_md(&self, md: &str) {
        if self.opts.use_color {
            self.skin.print_text(md);
        } else {
            print!("{}", plain_text(md));
        }
    }

    pub fn print_info(&self, message: &str) {
        if self.opts.use_color {
            let md = format!("|-|\n| {message} |\n|-|\n");
            self.skin.print_text(&md);
        } else {
            println!("{message}");
        }
    }

    pub fn print_metrics(&self, recent_minutes: u64, running_distance: f64) {
        if self.opts.use_color {
            self.print_md(&format!(
                "**Total minutes (last 7 days):** {recent_minutes}\n\
                 **Running distance (last 30d):** {running_distance:.2} mi\n"
            ));
        } else {
            println!("Total minutes (last 7 days): {recent_minutes}");
            println!("Running distance (last 30d): {running_distance:.2} mi");
        }
    }

    /// Prints all entries as a table, in the order given.
    pub fn print_entries_table(&self, entries: &[ActivityEntry]) {
        if self.opts.use_color {
            self.print_md(&table_markdown(entries, &self.opts.date_format));
        } else {
            print!("{}", table_plain(entries, &self.opts.date_format));
        }
    }
}

/// One display row per entry. Dates are shown with the configured format
/// when they parse, verbatim otherwise.
fn table_rows(entries: &[ActivityEntry], date_format: &str) -> Vec<[String; 5]> {
    entries
        .iter()
        .map(|entry| {
            let date = match entry.day() {
                Some(d) => d.format(date_format).to_string(),
                None => entry.date.clone(),
            };
            let distance = entry
                .distance_miles
                .map(|v| format!("{v:.2}"))
                .unwrap_or_default();
            [
                cell(&date),
                cell(&entry.activity),
                entry.duration_min.to_string(),
                distance,
                cell(&entry.notes),
            ]
        })
        .collect()
}

/// Builds the dashboard table for the termimad skin.
fn table_markdown(entries: &[ActivityEntry], date_format: &str) -> String {
    let mut md = String::new();
    md.push_str("|:-|:-|-:|-:|:-|\n");
    md.push_str("|**Date**|**Activity**|**Duration (min)**|**Distance (mi)**|**Notes**|\n");
    md.push_str("|:-|:-|-:|-:|:-|\n");
    for row in table_rows(entries, date_format) {
        md.push_str(&format!(
            "| {} | {} | {} | {} | {} |\n",
            row[0], row[1], row[2], row[3], row[4]
        ));
    }
    md.push_str("|-|\n");
    md
}

/// Column-aligned plain text for redirected output.
fn table_plain(entries: &[ActivityEntry], date_format: &str) -> String {
    let rows = table_rows(entries, date_format);
    let mut widths = TABLE_HEADINGS.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let mut push_row = |cells: [&str; 5]| {
        let line = cells
            .iter()
            .zip(widths)
            .map(|(cell, width)| format!("{cell:<width$}"))
            .collect::<Vec<_>>()
            .join("  ");
        out.push_str(line.trim_end());
        out.push('\n');
    };

    push_row(TABLE_HEADINGS);
    for row in &rows {
        push_row([
            row[0].as_str(),
            row[1].as_str(),
            row[2].as_str(),
            row[3].as_str(),
            row[4].as_str(),
        ]);
    }
    out
}

/// Table cells cannot hold pipes or line breaks.
fn cell(s: &str) -> String {
    s.replace(['\n', '\r'], " ").replace('|', "/")
}

/// Strips the markdown the skin would have styled: emphasis markers and
/// header prefixes.
fn plain_text(md: &str) -> String {
    let mut out = String::new();
    for line in md.lines() {
        let line = line.replace("**", "");
        let line = line
            .strip_prefix("## ")
            .or_else(|| line.strip_prefix("# "))
            .unwrap_or(&line);
        out.push_str(line);
        out.push('\n');
    }
    out
}
