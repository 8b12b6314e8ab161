use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use crate::row::ReportRow;

/// Self-contained HTML report: rows embedded as JSON, rendered client-side
/// with paging and an average-score banner. No external assets.
pub fn write_html_report(output_path: &Path, rows: &[ReportRow], page_size: usize) -> Result<()> {
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
    }

    let page_size = page_size.max(1);
    let rows_json = serde_json::to_string(rows)
        .context("Failed to serialize report rows")?
        // A literal "</script>" inside a cell must not close the data block.
        .replace("</", "<\\/");
    let generated = chrono::Local::now().format("%Y-%m-%d %H:%M").to_string();

    let html = TEMPLATE
        .replace("__ROWS_JSON__", &rows_json)
        .replace("__PAGE_SIZE__", &page_size.to_string())
        .replace("__GENERATED__", &generated);

    let mut file = std::fs::File::create(output_path)
        .with_context(|| format!("Failed to create {}", output_path.display()))?;
    file.write_all(html.as_bytes())
        .with_context(|| format!("Failed to write {}", output_path.display()))?;

    info!(path = %output_path.display(), rows = rows.len(), "HTML report written");
    Ok(())
}

const TEMPLATE: &str = r#"<!doctype html>
<html lang="sk">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>GEO Audit Report</title>
<style>
  :root { --bg:#11151c; --card:#1a2029; --text:#e8ecf2; --muted:#8b95a5; --line:#2a3240; }
  * { box-sizing: border-box; }
  body { margin:0; padding:24px; background:var(--bg); color:var(--text);
         font:14px/1.5 system-ui, -apple-system, "Segoe UI", sans-serif; }
  h1 { font-size:20px; margin:0 0 4px; }
  .meta { color:var(--muted); margin-bottom:16px; }
  .summary { display:flex; gap:24px; background:var(--card); border:1px solid var(--line);
             border-radius:8px; padding:12px 16px; margin-bottom:16px; }
  .summary .label { color:var(--muted); margin-right:6px; }
  .summary .value { font-weight:600; }
  .value.good { color:#5ee7a8; } .value.warn { color:#ffbe5c; } .value.bad { color:#ff8b8b; }
  table { width:100%; border-collapse:collapse; background:var(--card);
          border:1px solid var(--line); border-radius:8px; overflow:hidden; }
  th, td { padding:8px 10px; border-bottom:1px solid var(--line); text-align:left;
           vertical-align:top; }
  th { color:var(--muted); font-weight:600; white-space:nowrap; }
  td.num { text-align:right; font-variant-numeric:tabular-nums; }
  td.crit { text-align:center; }
  .pass { color:#5ee7a8; } .fail { color:#ff8b8b; }
  .title-cell { max-width:320px; }
  .title-cell a { color:var(--text); text-decoration:none; }
  .title-cell a:hover { text-decoration:underline; }
  .recs { color:var(--muted); font-size:12px; max-width:420px; }
  .pager { display:flex; gap:8px; align-items:center; margin-top:12px; }
  .pager button { background:var(--card); color:var(--text); border:1px solid var(--line);
                  border-radius:6px; padding:6px 12px; cursor:pointer; }
  .pager button:disabled { opacity:.4; cursor:default; }
  .pager .info { color:var(--muted); }
</style>
</head>
<body>
<h1>GEO Audit Report</h1>
<div class="meta">Vygenerované: __GENERATED__</div>
<div class="summary">
  <div><span class="label">Články:</span><span id="total" class="value">0</span></div>
  <div><span class="label">Priemerné skóre:</span><span id="avgScore" class="value">0,0</span></div>
</div>
<table>
  <thead>
    <tr>
      <th>Článok</th><th>Skóre</th>
      <th>Úvod</th><th>Definícia</th><th>H2</th><th>Fakty</th><th>Zdroje</th>
      <th>FAQ</th><th>Zoznamy</th><th>Tabuľky</th><th>Dĺžka</th><th>Meta</th>
      <th>Slová</th><th>Odporúčania</th>
    </tr>
  </thead>
  <tbody id="tbody"></tbody>
</table>
<div class="pager">
  <button id="prev">&#8592;</button>
  <span id="pageInfo" class="info"></span>
  <button id="next">&#8594;</button>
</div>
<script id="rows-data" type="application/json">__ROWS_JSON__</script>
<script>
  const rows = JSON.parse(document.getElementById("rows-data").textContent);
  const pageSize = __PAGE_SIZE__;
  let page = 0;

  const criteria = ["direct_answer","definition","headings","facts","sources",
                    "faq","lists","tables","word_count_ok","meta_ok"];

  function esc(s) {
    return String(s ?? "").replace(/[&<>"']/g, c => ({
      "&":"&amp;","<":"&lt;",">":"&gt;",'"':"&quot;","'":"&#39;"
    }[c]));
  }

  function scoreBand(score) {
    return score >= 8 ? "good" : score >= 5 ? "warn" : "bad";
  }

  function render() {
    const pages = Math.max(1, Math.ceil(rows.length / pageSize));
    page = Math.min(page, pages - 1);
    const slice = rows.slice(page * pageSize, (page + 1) * pageSize);

    document.getElementById("tbody").innerHTML = slice.map(r => {
      const crit = criteria.map(c =>
        `<td class="crit ${r[c] ? "pass" : "fail"}">${r[c] ? "&#10003;" : "&#10007;"}</td>`
      ).join("");
      return `<tr>
        <td class="title-cell"><a href="${esc(r.url)}" target="_blank" rel="noopener">${esc(r.title || r.url)}</a></td>
        <td class="num value ${scoreBand(r.score)}">${r.score}/10</td>
        ${crit}
        <td class="num">${r.word_count}</td>
        <td class="recs">${esc(r.recommendations)}</td>
      </tr>`;
    }).join("");

    document.getElementById("total").textContent = rows.length;
    const avg = rows.length
      ? rows.reduce((sum, r) => sum + Number(r.score || 0), 0) / rows.length
      : 0;
    const avgEl = document.getElementById("avgScore");
    avgEl.textContent = avg.toFixed(1).replace(".", ",");
    avgEl.className = "value " + scoreBand(avg);

    document.getElementById("pageInfo").textContent = `${page + 1} / ${pages}`;
    document.getElementById("prev").disabled = page === 0;
    document.getElementById("next").disabled = page >= pages - 1;
  }

  document.getElementById("prev").addEventListener("click", () => { page--; render(); });
  document.getElementById("next").addEventListener("click", () => { page++; render(); });
  render();
</script>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_embeds_rows_and_page_size() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.html");
        let rows = vec![ReportRow::failed("https://example.sk/a", "Článok A", "x")];
        write_html_report(&path, &rows, 25).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("Článok A"));
        assert!(content.contains("const pageSize = 25;"));
    }

    #[test]
    fn test_script_close_tag_is_escaped_in_data() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.html");
        let rows = vec![ReportRow::failed("u", "zákerný </script> titulok", "x")];
        write_html_report(&path, &rows, 10).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains(r#"<\/script> titulok"#));
    }

    #[test]
    fn test_zero_page_size_clamped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("r.html");
        write_html_report(&path, &[], 0).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("const pageSize = 1;"));
    }
}
