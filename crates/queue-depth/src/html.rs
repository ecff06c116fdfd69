use crate::{BranchReport, PlatformCell, QueueReport, SeverityBand};

const STYLE: &str = r#"
body { font-family: sans-serif; }
table.queue-depth td { padding: 4px 8px; border: 1px solid #808080; }
table.legend td { padding: 2px 8px; }
p.generated { color: #808080; font-size: small; }
"#;

/// Renders the dashboard page: one table per tracked branch followed by the
/// color legend. Branches without a run or without platforms render as an
/// empty table.
pub fn render_html(report: &QueueReport) -> String {
  let job_type = escape_html(report.job_type.as_str());
  let mut html = String::with_capacity(4096);

  html.push_str("<!DOCTYPE html>\n<html>\n<head>\n");
  html.push_str(&format!(
    "<title>NMI - {} queue depths for core platforms</title>\n",
    capitalize(&job_type)
  ));
  html.push_str(&format!("<style>{}</style>\n", STYLE));
  html.push_str("</head>\n<body>\n");

  html.push_str(&format!("<h2>NMI {} queue depths:</h2>\n", job_type));
  html.push_str(&format!(
    "<p>This page contains depth information for jobs of type \"{}\" only</p>\n",
    job_type
  ));

  for branch in &report.branches {
    html.push_str(&render_branch(branch));
  }

  html.push_str(&render_legend());
  html.push_str(&format!(
    "<p class=\"generated\">Generated at {}</p>\n",
    report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
  ));
  html.push_str("</body>\n</html>\n");

  html
}

fn render_branch(branch: &BranchReport) -> String {
  let mut html = format!("<h3>Branch - {}</h3>\n", escape_html(&branch.branch));

  html.push_str("<table class=\"queue-depth\" border=\"0\" cellspacing=\"0\">\n<tr>\n");
  for cell in &branch.cells {
    html.push_str(&render_cell(cell));
  }
  html.push_str("</tr>\n</table>\n");

  html
}

fn render_cell(cell: &PlatformCell) -> String {
  let listing = cell
    .listing
    .iter()
    .map(|job| escape_html(&job.summary()))
    .collect::<Vec<_>>()
    .join("&#10;");

  format!(
    "<td align=\"center\" class=\"{band}\" style=\"background-color:{color}\" title=\"{listing}\">{name} {depth}</td>\n",
    band = cell.band.to_string(),
    color = cell.band.color(),
    listing = listing,
    name = escape_html(&cell.display_name),
    depth = cell.depth,
  )
}

fn render_legend() -> String {
  let mut html = String::from("<p>Legend:</p>\n<table class=\"legend\">\n<tr>\n");

  for band in SeverityBand::ALL {
    html.push_str(&format!(
      "<td style=\"background-color:{}\">{}</td>\n",
      band.color(),
      band.label()
    ));
  }

  html.push_str("</tr>\n</table>\n");
  html
}

fn capitalize(value: &str) -> String {
  let mut chars = value.chars();
  match chars.next() {
    Some(first) => first.to_uppercase().chain(chars).collect(),
    None => String::new(),
  }
}

pub fn escape_html(value: &str) -> String {
  let mut escaped = String::with_capacity(value.len());

  for c in value.chars() {
    match c {
      '&' => escaped.push_str("&amp;"),
      '<' => escaped.push_str("&lt;"),
      '>' => escaped.push_str("&gt;"),
      '"' => escaped.push_str("&quot;"),
      '\'' => escaped.push_str("&#39;"),
      _ => escaped.push(c),
    }
  }

  escaped
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{JobType, Platform, QueuedJob, RunId};

  fn cell(stored: &str, depth: usize) -> PlatformCell {
    let platform = Platform::parse(stored);
    let listing = (0..depth)
      .map(|i| QueuedJob {
        run_id: RunId::new(100 + i as u64),
        description: "trunk-nightly".to_string(),
        platform: platform.clone(),
        job_type: JobType::new("build"),
      })
      .collect();

    PlatformCell {
      display_name: platform.display_name().to_string(),
      platform,
      depth,
      band: SeverityBand::classify(depth),
      listing,
    }
  }

  fn report(branches: Vec<BranchReport>) -> QueueReport {
    QueueReport {
      job_type: JobType::new("build"),
      generated_at: chrono::Utc::now(),
      branches,
    }
  }

  #[test]
  fn test_escape_html() {
    assert_eq!(
      escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
      "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
    );
    assert_eq!(escape_html("NMI Ports - trunk"), "NMI Ports - trunk");
  }

  #[test]
  fn test_render_cells() {
    let html = render_html(&report(vec![BranchReport {
      branch: "trunk".to_string(),
      run_id: Some(RunId::new(500)),
      cells: vec![cell("nmi:linux-x86", 0), cell("nmi:windows-x64", 4)],
    }]));

    assert!(html.contains("<h3>Branch - trunk</h3>"));
    assert!(html.contains("style=\"background-color:#00FFFF\" title=\"\">linux-x86 0</td>"));
    assert!(html.contains(">windows-x64 4</td>"));
    assert!(html.contains("class=\"medium\" style=\"background-color:#FFFF00\""));
    assert!(html.contains("title=\"100 trunk-nightly&#10;101 trunk-nightly"));
    assert!(!html.contains("nmi:"));
  }

  #[test]
  fn test_render_empty_branch() {
    let html = render_html(&report(vec![BranchReport::empty("experimental", None)]));

    assert!(html.contains(
      "<h3>Branch - experimental</h3>\n<table class=\"queue-depth\" border=\"0\" cellspacing=\"0\">\n<tr>\n</tr>\n</table>"
    ));
  }

  #[test]
  fn test_render_legend() {
    let html = render_html(&report(vec![]));

    assert!(html.contains("<td style=\"background-color:#00FFFF\">Depth 0</td>"));
    assert!(html.contains("<td style=\"background-color:#00FF00\">Depth 1-2</td>"));
    assert!(html.contains("<td style=\"background-color:#FFFF00\">Depth 3-5</td>"));
    assert!(html.contains("<td style=\"background-color:#FF0000\">Depth 6+</td>"));
    assert!(html.contains("<title>NMI - Build queue depths for core platforms</title>"));
    assert!(html.ends_with("</html>\n"));
  }

  #[test]
  fn test_render_escapes_job_type() {
    let mut report = report(vec![]);
    report.job_type = JobType::new("<script>");

    let html = render_html(&report);
    assert!(!html.contains("<script>"));
    assert!(html.contains("jobs of type \"&lt;script&gt;\" only"));
  }
}
