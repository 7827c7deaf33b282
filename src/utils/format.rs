/// Monto en rupias con dos decimales: `₹1000.00`
pub fn format_amount(amount: f64) -> String {
    format!("₹{:.2}", amount)
}

/// "pending" -> "Pending"
pub fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
