//! Printable documents rendered as standalone HTML pages.

mod bill_of_sale;
mod invoice;
mod job_card;

pub use bill_of_sale::render_bill_of_sale;
pub use invoice::{render_invoice, InvoiceTotals};
pub use job_card::render_job_card;

/// Letterhead printed on every document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Letterhead {
    pub name: String,
    pub tagline: String,
    pub address: String,
    pub phone: String,
}

impl Default for Letterhead {
    fn default() -> Self {
        Self {
            name: "ApexDrive Motors".to_string(),
            tagline: "Automotive Sales & Service Center".to_string(),
            address: "123 Dealership Way, Auto City, CA 90210".to_string(),
            phone: "(555) 019-2834".to_string(),
        }
    }
}

/// `$1234.50`
pub fn dollars(amount: f64) -> String {
    format!("${amount:.2}")
}

/// Ticket and invoice numbers are zero-padded to six digits.
pub(crate) fn document_number(id: i64) -> String {
    format!("{id:06}")
}

pub(crate) fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

pub(crate) fn letterhead_block(head: &Letterhead, doc_title: &str, right: &str) -> String {
    format!(
        r#"<div class="head">
    <div>
        <h1>{name}</h1>
        <p>{tagline}</p>
        <p>{address} &bull; {phone}</p>
    </div>
    <div class="doc">
        <h2>{doc_title}</h2>
        {right}
    </div>
</div>"#,
        name = html_escape(&head.name),
        tagline = html_escape(&head.tagline),
        address = html_escape(&head.address),
        phone = html_escape(&head.phone),
    )
}

pub(crate) fn build_document(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
<style>
*{{margin:0;padding:0;box-sizing:border-box;}}
body{{font-family:Georgia,"Times New Roman",serif;color:#111;background:#fff;}}
.page{{max-width:800px;margin:0 auto;padding:40px;}}
.head{{display:flex;justify-content:space-between;align-items:flex-start;border-bottom:4px solid #111;padding-bottom:16px;margin-bottom:32px;}}
.head h1{{font-size:30px;text-transform:uppercase;letter-spacing:2px;}}
.head p{{font-size:13px;color:#555;}}
.doc{{text-align:right;}}
.doc h2{{font-size:24px;text-transform:uppercase;}}
.doc .num{{font-family:monospace;font-size:18px;}}
.grid{{display:grid;grid-template-columns:1fr 1fr;gap:24px;margin-bottom:32px;}}
.box{{border:1px solid #111;padding:12px;font-size:14px;}}
.box h3{{font-size:12px;text-transform:uppercase;background:#eee;padding:4px;margin-bottom:8px;}}
table{{width:100%;border-collapse:collapse;font-size:14px;margin-bottom:32px;}}
td,th{{padding:8px;border-bottom:1px solid #ccc;text-align:left;}}
td.amt,th.amt{{text-align:right;font-family:monospace;}}
tr.total td{{font-weight:bold;font-size:18px;border-top:2px solid #111;}}
.lines p{{border-bottom:1px solid #999;height:32px;color:#888;font-style:italic;font-size:13px;}}
.fine{{font-size:11px;color:#666;font-style:italic;margin-bottom:48px;}}
.signatures{{display:grid;grid-template-columns:1fr 1fr;gap:64px;margin-top:48px;}}
.signatures div{{border-top:2px solid #111;padding-top:6px;text-align:center;font-size:12px;text-transform:uppercase;font-weight:bold;}}
.footer{{text-align:center;font-size:12px;color:#666;margin-top:32px;}}
@media print{{.page{{padding:0;}}}}
</style>
</head>
<body>
<div class="page">
{content}
</div>
</body>
</html>"#,
        title = html_escape(title),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup() {
        assert_eq!(
            html_escape(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn numbers_are_padded() {
        assert_eq!(document_number(42), "000042");
        assert_eq!(document_number(1234567), "1234567");
    }

    #[test]
    fn dollars_have_cents() {
        assert_eq!(dollars(100.0), "$100.00");
        assert_eq!(dollars(376.549), "$376.55");
    }
}
