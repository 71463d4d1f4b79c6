//! Minimal server-rendered pages for the confirmation and history links.

use crate::models::HistoryEntry;

/// A single-card result page for the confirmation flow.
pub fn result_page(title: &str, message: &str, success: bool) -> String {
    let accent = if success { "#10B981" } else { "#EF4444" };
    let icon = if success { "&#10003;" } else { "&#10007;" };
    let title = escape(title);
    let message = escape(message);

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{title} - ChoreWheel</title>
  <style>
    * {{ box-sizing: border-box; margin: 0; padding: 0; }}
    body {{
      font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
      display: flex;
      justify-content: center;
      align-items: center;
      min-height: 100vh;
      background: linear-gradient(135deg, {accent}22, {accent}44);
      padding: 1rem;
    }}
    .card {{
      background: white;
      padding: 2.5rem;
      border-radius: 16px;
      box-shadow: 0 10px 40px rgba(0,0,0,0.1);
      text-align: center;
      max-width: 400px;
      width: 100%;
    }}
    .icon {{
      width: 64px;
      height: 64px;
      border-radius: 50%;
      background: {accent};
      color: white;
      font-size: 32px;
      display: flex;
      align-items: center;
      justify-content: center;
      margin: 0 auto 1.5rem;
    }}
    h1 {{ color: #1F2937; margin-bottom: 1rem; font-size: 1.5rem; }}
    p {{ color: #6B7280; line-height: 1.6; }}
  </style>
</head>
<body>
  <div class="card">
    <div class="icon">{icon}</div>
    <h1>{title}</h1>
    <p>{message}</p>
  </div>
</body>
</html>"#
    )
}

pub fn error_page(message: &str) -> String {
    let message = escape(message);

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>Error - ChoreWheel</title>
  <style>
    * {{ box-sizing: border-box; margin: 0; padding: 0; }}
    body {{
      font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
      display: flex;
      justify-content: center;
      align-items: center;
      min-height: 100vh;
      background: #FEE2E2;
      padding: 1rem;
    }}
    .card {{
      background: white;
      padding: 2.5rem;
      border-radius: 16px;
      box-shadow: 0 10px 40px rgba(0,0,0,0.1);
      text-align: center;
      max-width: 400px;
    }}
    h1 {{ color: #DC2626; margin-bottom: 1rem; }}
    p {{ color: #6B7280; }}
  </style>
</head>
<body>
  <div class="card">
    <h1>Error</h1>
    <p>{message}</p>
  </div>
</body>
</html>"#
    )
}

/// The member's recent-weeks table.
pub fn history_page(member_name: &str, entries: &[HistoryEntry]) -> String {
    let rows: String = entries
        .iter()
        .map(|entry| {
            let week = entry.week_of.format("%b %-d, %Y");
            let (status, fg, bg) = if entry.confirmed {
                ("Completed", "#10B981", "#D1FAE5")
            } else {
                ("Pending", "#F59E0B", "#FEF3C7")
            };

            format!(
                r#"      <tr>
        <td>{week}</td>
        <td>
          <div class="chore-name">{name}</div>
          <div class="chore-desc">{desc}</div>
        </td>
        <td><span class="status" style="background: {bg}; color: {fg};">{status}</span></td>
      </tr>
"#,
                name = escape(&entry.chore_name),
                desc = escape(&entry.chore_description),
            )
        })
        .collect();

    let body = if entries.is_empty() {
        r#"<p class="empty">No chore history found.</p>"#.to_string()
    } else {
        format!(
            r#"<table>
      <thead>
        <tr><th>Week Of</th><th>Chore</th><th>Status</th></tr>
      </thead>
      <tbody>
{rows}      </tbody>
    </table>"#
        )
    };
    let member_name = escape(member_name);

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{member_name}'s Chore History - ChoreWheel</title>
  <style>
    * {{ box-sizing: border-box; margin: 0; padding: 0; }}
    body {{
      font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
      padding: 1.5rem;
      background: #F3F4F6;
      min-height: 100vh;
    }}
    .container {{
      max-width: 600px;
      margin: 0 auto;
      background: white;
      border-radius: 16px;
      padding: 2rem;
      box-shadow: 0 4px 6px rgba(0,0,0,0.05);
    }}
    h1 {{ color: #1F2937; margin-bottom: 0.5rem; font-size: 1.5rem; }}
    .subtitle {{ color: #6B7280; margin-bottom: 1.5rem; font-size: 0.875rem; }}
    table {{ width: 100%; border-collapse: collapse; }}
    th, td {{
      padding: 1rem 0.75rem;
      text-align: left;
      border-bottom: 1px solid #E5E7EB;
    }}
    th {{
      color: #6B7280;
      font-size: 0.75rem;
      text-transform: uppercase;
      letter-spacing: 0.05em;
      font-weight: 600;
    }}
    .chore-name {{ font-weight: 500; color: #1F2937; }}
    .chore-desc {{ font-size: 0.875rem; color: #6B7280; margin-top: 0.25rem; }}
    .status {{
      display: inline-block;
      padding: 0.25rem 0.75rem;
      border-radius: 9999px;
      font-size: 0.75rem;
      font-weight: 600;
    }}
    .empty {{ text-align: center; color: #6B7280; padding: 2rem; }}
  </style>
</head>
<body>
  <div class="container">
    <h1>{member_name}'s Chore History</h1>
    <p class="subtitle">Past month of chore assignments</p>
    {body}
  </div>
</body>
</html>"#
    )
}

/// Names and descriptions come from trusted configuration, but escaping is
/// still required before they reach markup.
fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
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

    #[test]
    fn escape_neutralizes_markup() {
        assert_eq!(
            escape(r#"<b>"chores" & 'more'</b>"#),
            "&lt;b&gt;&quot;chores&quot; &amp; &#39;more&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn history_page_shows_empty_state() {
        let page = history_page("Alice", &[]);
        assert!(page.contains("No chore history found."));
    }
}
