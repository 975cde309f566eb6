//! Listing-document rendering
//!
//! Two documents are produced from the same rows: `index.md` (an HTML table
//! embedded in Markdown, served by the pages branch) and `ReadMe.md` (a plain
//! pipe table shown when browsing the branch itself).

/// One artifact link inside a row
#[derive(Debug, Clone)]
pub struct ArtifactCell {
  pub file: String,
  pub size_kib: u64,
}

/// One build on the page: commit metadata plus one cell per platform column
#[derive(Debug, Clone)]
pub struct BuildRow {
  pub date: String,
  pub time: String,
  pub short_sha: String,
  pub sha: String,
  pub cells: Vec<Option<ArtifactCell>>,
}

/// One platform column
#[derive(Debug, Clone)]
pub struct ColumnSpec {
  /// Column header, e.g. "Windows"
  pub name: String,
  /// Stable filename of the newest artifact
  pub latest_alias: String,
  /// Link label, e.g. "Zip"
  pub label: String,
}

/// Static page properties shared by both documents
pub struct PageLayout<'a> {
  pub title: &'a str,
  pub commit_base_url: &'a str,
  pub columns: &'a [ColumnSpec],
}

/// Link label derived from the archive extension ("zip" -> "Zip")
pub fn label_for(extension: &str) -> String {
  let mut chars = extension.chars();
  match chars.next() {
    Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
    None => String::new(),
  }
}

/// Render the HTML-flavored `index.md`
///
/// Rows must be newest-first; the newest build is additionally emitted as a
/// "Latest" row linking the stable alias.
pub fn render_index(layout: &PageLayout<'_>, rows: &[BuildRow]) -> String {
  let mut out = String::new();

  out.push_str(&format!("# {}\n\n", layout.title));
  out.push_str("<table>\n");

  out.push_str("<tr><td><b>Date</b></td><td><b>Time</b></td><td><b>Commit</b></td>");
  for column in layout.columns {
    out.push_str(&format!("<td><b>{}</b></td>", column.name));
  }
  out.push_str("</tr>\n");

  if let Some(newest) = rows.first() {
    out.push_str(&format!(
      "<tr><td colspan='2'><div align='center'><i>Latest</i></div></td><td><a href=\"{}/{}\"><code>{}</code></a></td>",
      layout.commit_base_url, newest.sha, newest.short_sha
    ));
    for (column, cell) in layout.columns.iter().zip(&newest.cells) {
      match cell {
        Some(cell) => out.push_str(&format!(
          "<td><a href=\"./{}\">{} ({}K)</a></td>",
          column.latest_alias, column.label, cell.size_kib
        )),
        None => out.push_str("<td></td>"),
      }
    }
    out.push_str("</tr>\n");
  }

  for row in rows {
    out.push_str(&format!(
      "<tr><td>{}</td><td>{}</td><td><a href=\"{}/{}\"><code>{}</code></a></td>",
      row.date, row.time, layout.commit_base_url, row.sha, row.short_sha
    ));
    for (column, cell) in layout.columns.iter().zip(&row.cells) {
      match cell {
        Some(cell) => out.push_str(&format!(
          "<td><a href=\"./{}\">{} ({}K)</a></td>",
          cell.file, column.label, cell.size_kib
        )),
        None => out.push_str("<td></td>"),
      }
    }
    out.push_str("</tr>\n");
  }

  out.push_str("</table>\n");
  out
}

/// Render the plain-Markdown `ReadMe.md`
pub fn render_readme(layout: &PageLayout<'_>, rows: &[BuildRow]) -> String {
  let mut out = String::new();

  out.push_str(&format!("# {}\n", layout.title));

  out.push_str("|Date|Time|Commit|");
  for column in layout.columns {
    out.push_str(&format!("{}|", column.name));
  }
  out.push('\n');

  out.push_str("|----|----|------|");
  for column in layout.columns {
    out.push_str(&format!("{}|", "-".repeat(column.name.len().max(4))));
  }
  out.push('\n');

  if let Some(newest) = rows.first() {
    out.push_str(&format!(
      "| Latest |  | [`{}`]({}/{}) |",
      newest.short_sha, layout.commit_base_url, newest.sha
    ));
    for (column, cell) in layout.columns.iter().zip(&newest.cells) {
      match cell {
        Some(cell) => out.push_str(&format!(
          " [{} ({}K)](./{}) |",
          column.label, cell.size_kib, column.latest_alias
        )),
        None => out.push_str("  |"),
      }
    }
    out.push('\n');
  }

  for row in rows {
    out.push_str(&format!(
      "| {} | {} | [`{}`]({}/{}) |",
      row.date, row.time, row.short_sha, layout.commit_base_url, row.sha
    ));
    for (column, cell) in layout.columns.iter().zip(&row.cells) {
      match cell {
        Some(cell) => out.push_str(&format!(" [{} ({}K)](./{}) |", column.label, cell.size_kib, cell.file)),
        None => out.push_str("  |"),
      }
    }
    out.push('\n');
  }

  out
}
