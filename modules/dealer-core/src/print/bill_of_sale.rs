use chrono::NaiveDate;
use dealer_client::Vehicle;

use super::{build_document, dollars, html_escape, letterhead_block, Letterhead};
use crate::desking::{Buyer, DealTerms};

const BLANK: &str = "_________________";

const DISCLAIMER: &str = "By signing below, the Buyer acknowledges receipt of the vehicle described above \
and agrees that the information provided is accurate. This document serves as a preliminary bill of sale \
and is subject to final bank approval. The vehicle is sold \"AS-IS\" unless a separate warranty document \
is attached.";

fn or_blank(value: &str) -> String {
    if value.trim().is_empty() {
        BLANK.to_string()
    } else {
        html_escape(value)
    }
}

fn or_na(value: &str) -> String {
    if value.trim().is_empty() {
        "N/A".to_string()
    } else {
        html_escape(value)
    }
}

/// Vehicle purchase agreement for the current quote. Returns `None` when no
/// vehicle is selected.
pub fn render_bill_of_sale(
    head: &Letterhead,
    vehicle: Option<&Vehicle>,
    buyer: &Buyer,
    terms: &DealTerms,
    date: NaiveDate,
) -> Option<String> {
    let vehicle = vehicle?;

    let header = letterhead_block(head, "Vehicle Purchase Agreement", "");

    let parties = format!(
        r#"<div class="grid">
    <div class="box">
        <h3>Buyer Information</h3>
        <p><b>Name:</b> {name}</p>
        <p><b>Phone:</b> {phone}</p>
        <p><b>Date:</b> {date}</p>
    </div>
    <div class="box">
        <h3>Vehicle Description</h3>
        <p><b>Year/Make/Model:</b> {title}</p>
        <p><b>VIN:</b> {vin}</p>
        <p><b>Stock #:</b> {stock}</p>
        <p><b>Color:</b> {color}</p>
    </div>
</div>"#,
        name = or_blank(&buyer.name),
        phone = or_blank(&buyer.phone),
        date = date.format("%m/%d/%Y"),
        title = html_escape(&vehicle.title()),
        vin = or_na(&vehicle.vin),
        stock = html_escape(&vehicle.stock_number),
        color = or_na(&vehicle.color),
    );

    let breakdown = format!(
        r#"<table>
    <tr><th colspan="2">Financial Breakdown</th></tr>
    <tr><td>1. Vehicle Selling Price</td><td class="amt">{price}</td></tr>
    <tr><td>2. Down Payment</td><td class="amt">({down})</td></tr>
    <tr><td>3. Amount Financed (1 - 2)</td><td class="amt">{financed}</td></tr>
    <tr><td>4. Estimated APR</td><td class="amt">{apr}%</td></tr>
    <tr><td>5. Term (Months)</td><td class="amt">{term}</td></tr>
    <tr class="total"><td>Estimated Monthly Payment</td><td class="amt">{monthly}</td></tr>
</table>"#,
        price = dollars(terms.price),
        down = dollars(terms.down_payment),
        financed = dollars(terms.amount_financed()),
        apr = terms.apr,
        term = terms.term_months,
        monthly = dollars(terms.monthly_payment()),
    );

    let closing = format!(
        r#"<p class="fine">{disclaimer} {dealer} is not responsible for any wear and tear occurring after the vehicle leaves the premises.</p>
<div class="signatures"><div>Buyer Signature</div><div>Dealer Representative</div></div>"#,
        disclaimer = html_escape(DISCLAIMER),
        dealer = html_escape(&head.name),
    );

    let content = format!("{header}\n{parties}\n{breakdown}\n{closing}");
    Some(build_document("Bill of Sale", &content))
}

#[cfg(test)]
mod tests {
    use super::*;
    use dealer_client::{LeadSource, VehicleStatus};

    fn vehicle() -> Vehicle {
        Vehicle {
            id: 1,
            vin: String::new(),
            stock_number: "STK-1".into(),
            make: "Honda".into(),
            model: "Civic".into(),
            year: Some(2021),
            trim: String::new(),
            body_style: String::new(),
            color: String::new(),
            mileage: 0,
            license_plate: None,
            cost_price: 0.0,
            selling_price: 20000.0,
            sold_date: None,
            status: VehicleStatus::Available,
            photo: None,
        }
    }

    fn terms() -> DealTerms {
        DealTerms {
            price: 20000.0,
            down_payment: 2000.0,
            apr: 0.0,
            term_months: 60,
        }
    }

    #[test]
    fn nothing_without_vehicle() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        assert!(render_bill_of_sale(&Letterhead::default(), None, &Buyer::default(), &terms(), date).is_none());
    }

    #[test]
    fn renders_quote_with_placeholders() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        let buyer = Buyer {
            name: "<script>Dana</script>".into(),
            phone: String::new(),
            source: LeadSource::WalkIn,
        };
        let v = vehicle();
        let html = render_bill_of_sale(&Letterhead::default(), Some(&v), &buyer, &terms(), date).unwrap();

        assert!(html.contains("&lt;script&gt;Dana&lt;/script&gt;"));
        assert!(!html.contains("<script>"));
        assert!(html.contains("<b>Phone:</b> _________________"));
        assert!(html.contains("<b>VIN:</b> N/A"));
        assert!(html.contains("2021 Honda Civic"));
        assert!(html.contains("$18000.00"));
        assert!(html.contains("($2000.00)"));
        assert!(html.contains("$300.00"));
        assert!(html.contains("03/02/2026"));
    }
}
