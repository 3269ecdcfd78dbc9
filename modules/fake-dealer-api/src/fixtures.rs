//! JSON payloads shaped like the backend's serializers.

use serde_json::{json, Value};

pub fn profile(username: &str, is_manager: bool) -> Value {
    json!({ "username": username, "is_manager": is_manager, "is_sales": !is_manager })
}

pub fn token(value: &str) -> Value {
    json!({ "token": value })
}

pub fn vehicle(id: i64, status: &str) -> Value {
    json!({
        "id": id,
        "vin": format!("1HGCM82633A00{id:04}"),
        "stock_number": format!("STK-{id}"),
        "make": "Honda",
        "model": "Civic",
        "year": 2021,
        "trim": "EX",
        "body_style": "Sedan",
        "color": "Blue",
        "mileage": 15000,
        "license_plate": null,
        "cost_price": "17000.00",
        "selling_price": "21500.00",
        "sold_date": null,
        "status": status,
        "photo": null,
        "created_at": "2026-01-10T09:00:00Z",
        "updated_at": "2026-01-10T09:00:00Z"
    })
}

pub fn lead(id: i64, status: &str, vehicle_id: Option<i64>) -> Value {
    json!({
        "id": id,
        "first_name": "Dana",
        "last_name": "Reyes",
        "phone": "555-0100",
        "email": null,
        "source": "Walk-in",
        "vehicle": vehicle_id,
        "vehicle_details": vehicle_id.map(|v| vehicle(v, "RESERVED")),
        "status": status,
        "quoted_price": "21500.00",
        "down_payment": "2000.00",
        "monthly_payment": "376.55",
        "term_months": 60,
        "created_at": "2026-03-02T15:30:00Z"
    })
}

pub fn service_vehicle(id: i64, owner: i64, plate: &str) -> Value {
    json!({
        "id": id,
        "owner": owner,
        "license_plate": plate,
        "make": "Toyota",
        "model": "Corolla",
        "year": 2019,
        "history": []
    })
}

pub fn service_customer(id: i64, name: &str, phone: &str) -> Value {
    json!({ "id": id, "name": name, "phone": phone, "email": null, "vehicles": [] })
}

pub fn service_record(id: i64, date: &str, status: &str) -> Value {
    json!({
        "id": id,
        "vehicle": 4,
        "vehicle_details": {
            "id": 4, "license_plate": "ABC123", "make": "Toyota", "model": "Corolla", "year": 2019
        },
        "customer_name": "Sam Ortiz",
        "customer_phone": "555-0142",
        "description": "Oil change",
        "date": date,
        "status": status,
        "parts_cost": "40.00",
        "labor_cost": "60.00",
        "total_cost": "100.00"
    })
}

pub fn appointment(id: i64, start: &str, end: &str) -> Value {
    json!({
        "id": id,
        "customer": 9,
        "customer_name": "Sam Ortiz",
        "vehicle": null,
        "title": "Brake inspection",
        "start_time": start,
        "end_time": end,
        "status": "SCHEDULED"
    })
}
