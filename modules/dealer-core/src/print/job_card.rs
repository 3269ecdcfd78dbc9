use dealer_client::ServiceRecord;

use super::{build_document, document_number, html_escape, letterhead_block, Letterhead};

/// Shop-floor ticket handed to the mechanic.
pub fn render_job_card(head: &Letterhead, record: &ServiceRecord) -> String {
    let number = document_number(record.id);
    let header = letterhead_block(
        head,
        "Service Ticket",
        &format!(
            r#"<p class="num">#{number}</p><p>Date: {date}</p>"#,
            date = record.date.format("%m/%d/%Y")
        ),
    );

    let (plate, make_model) = record
        .vehicle_details
        .as_ref()
        .map(|v| (v.license_plate.clone(), format!("{} {}", v.make, v.model)))
        .unwrap_or_default();

    let body = format!(
        r#"<div class="grid">
    <div class="box"><h3>License Plate</h3><p class="num">{plate}</p></div>
    <div class="box"><h3>Make / Model</h3><p><b>{make_model}</b></p></div>
</div>
<table>
    <tr><th>Requested Services</th><th class="amt">Done</th></tr>
    <tr><td>1. {description}</td><td class="amt">[ ]</td></tr>
</table>
<div class="lines">
    <p>Mechanic Notes:</p>
    <p>Parts Used:</p>
    <p>Labor Hours:</p>
</div>
<div class="signatures"><div>Service Advisor Signature</div><div>Customer Signature</div></div>
<div class="footer"><p>Thank you for choosing {name}. Please retain this document for warranty purposes.</p></div>"#,
        plate = html_escape(&plate),
        make_model = html_escape(make_model.trim()),
        description = html_escape(&record.description),
        name = html_escape(&head.name),
    );

    build_document(&format!("Service Ticket #{number}"), &format!("{header}\n{body}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use dealer_client::ServiceStatus;

    #[test]
    fn ticket_uses_record_date_and_escapes() {
        let record = ServiceRecord {
            id: 7,
            vehicle: 1,
            vehicle_details: None,
            customer_name: None,
            customer_phone: None,
            description: "Check <noise>".into(),
            date: "2026-02-14T16:00:00Z".parse().unwrap(),
            status: ServiceStatus::Pending,
            parts_cost: 0.0,
            labor_cost: 0.0,
        };
        let html = render_job_card(&Letterhead::default(), &record);
        assert!(html.contains("#000007"));
        assert!(html.contains("02/14/2026"));
        assert!(html.contains("1. Check &lt;noise&gt;"));
        assert!(html.contains("Mechanic Notes:"));
    }
}
