use chrono::NaiveDate;
use dealer_client::ServiceRecord;

use super::{build_document, document_number, dollars, html_escape, letterhead_block, Letterhead};

/// Invoice arithmetic. There is no sales tax on service work.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InvoiceTotals {
    pub parts: f64,
    pub labor: f64,
    pub subtotal: f64,
    pub tax: f64,
    pub total: f64,
}

impl InvoiceTotals {
    pub fn for_record(record: &ServiceRecord) -> Self {
        let subtotal = record.parts_cost + record.labor_cost;
        Self {
            parts: record.parts_cost,
            labor: record.labor_cost,
            subtotal,
            tax: 0.0,
            total: subtotal,
        }
    }
}

pub fn render_invoice(head: &Letterhead, record: &ServiceRecord, date: NaiveDate) -> String {
    let totals = InvoiceTotals::for_record(record);
    let number = document_number(record.id);

    let header = letterhead_block(
        head,
        "Invoice",
        &format!(
            r#"<p class="num">#{number}</p><p>Date: {date}</p>"#,
            date = date.format("%m/%d/%Y")
        ),
    );

    let customer = record
        .customer_name
        .as_deref()
        .filter(|n| !n.trim().is_empty())
        .unwrap_or("Valued Customer");
    let phone = record.customer_phone.as_deref().unwrap_or_default();
    let (plate, make_model) = match &record.vehicle_details {
        Some(v) => (v.license_plate.clone(), format!("{} {}", v.make, v.model)),
        None => (String::new(), String::new()),
    };

    let bill_to = format!(
        r#"<div class="grid">
    <div class="box">
        <h3>Bill To</h3>
        <p><b>{customer}</b></p>
        <p>{phone}</p>
        <p>{plate}</p>
        <p>{make_model}</p>
    </div>
    <div class="box">
        <h3>Service ID</h3>
        <p class="num">#{id}</p>
    </div>
</div>"#,
        customer = html_escape(customer),
        phone = html_escape(phone),
        plate = html_escape(&plate),
        make_model = html_escape(make_model.trim()),
        id = record.id,
    );

    let lines = format!(
        r#"<table>
    <tr><th>Description</th><th class="amt">Amount</th></tr>
    <tr><td><b>Primary Service Task</b><br>{description}</td><td class="amt">Included</td></tr>
    <tr><td>Parts &amp; Materials</td><td class="amt">{parts}</td></tr>
    <tr><td>Labor Charges</td><td class="amt">{labor}</td></tr>
    <tr><td>Subtotal</td><td class="amt">{subtotal}</td></tr>
    <tr><td>Tax (0%)</td><td class="amt">{tax}</td></tr>
    <tr class="total"><td>Total Due</td><td class="amt">{total}</td></tr>
</table>"#,
        description = html_escape(&record.description),
        parts = dollars(totals.parts),
        labor = dollars(totals.labor),
        subtotal = dollars(totals.subtotal),
        tax = dollars(totals.tax),
        total = dollars(totals.total),
    );

    let footer = format!(
        r#"<div class="footer"><p><b>Thank you for your business!</b></p><p>Payment is due upon receipt. Please make checks payable to {name}.</p></div>"#,
        name = html_escape(&head.name),
    );

    build_document(
        &format!("Invoice #{number}"),
        &format!("{header}\n{bill_to}\n{lines}\n{footer}"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use dealer_client::{ServiceStatus, VehicleSummary};

    fn record() -> ServiceRecord {
        ServiceRecord {
            id: 42,
            vehicle: 4,
            vehicle_details: Some(VehicleSummary {
                id: 4,
                license_plate: "ABC123".into(),
                make: "Toyota".into(),
                model: "Corolla".into(),
                year: Some(2019),
            }),
            customer_name: None,
            customer_phone: Some("555-0142".into()),
            description: "Brake pads & rotors".into(),
            date: "2026-03-02T09:00:00Z".parse().unwrap(),
            status: ServiceStatus::Completed,
            parts_cost: 120.5,
            labor_cost: 80.0,
        }
    }

    #[test]
    fn totals_add_parts_and_labor() {
        let totals = InvoiceTotals::for_record(&record());
        assert_eq!(totals.subtotal, 200.5);
        assert_eq!(totals.tax, 0.0);
        assert_eq!(totals.total, 200.5);
    }

    #[test]
    fn invoice_renders_number_and_defaults() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        let html = render_invoice(&Letterhead::default(), &record(), date);
        assert!(html.contains("#000042"));
        assert!(html.contains("Valued Customer"));
        assert!(html.contains("Brake pads &amp; rotors"));
        assert!(html.contains("Toyota Corolla"));
        assert!(html.contains("$200.50"));
        assert!(html.contains("$0.00"));
    }
}
