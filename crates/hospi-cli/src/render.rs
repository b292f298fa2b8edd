use std::fmt::Write;

use hospi_core::{Hospital, SearchFilters};

pub(crate) fn render_results(filters: &SearchFilters, hospitals: &[Hospital]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} in {}", filters.query, filters.location);
    let _ = writeln!(out, "Showing {} facilities", hospitals.len());
    for hospital in hospitals {
        out.push('\n');
        out.push_str(&render_card(hospital));
    }
    out
}

/// One hospital as a plain-text card.
pub(crate) fn render_card(hospital: &Hospital) -> String {
    let mut out = String::new();
    let badge = if hospital.is_verified { " [verified]" } else { "" };
    let _ = writeln!(out, "{}{badge}", hospital.name);
    let _ = writeln!(
        out,
        "  {:.1} stars ({} reviews)",
        hospital.rating, hospital.reviews_count
    );
    let _ = writeln!(out, "  {}", hospital.address);
    if let Some(distance) = &hospital.distance {
        let _ = writeln!(out, "  {distance} away");
    }
    let _ = writeln!(out, "  Phone: {}", hospital.phone);
    let _ = writeln!(
        out,
        "  Beds free: {}  Wait: {}  {}",
        hospital.bed_availability,
        hospital.wait_time,
        if hospital.is_open { "Open" } else { "Closed" }
    );

    let checklist = hospital
        .checklist
        .entries()
        .iter()
        .map(|(label, present)| format!("[{}] {label}", if *present { 'x' } else { ' ' }))
        .collect::<Vec<_>>()
        .join("  ");
    let _ = writeln!(out, "  {checklist}");

    if !hospital.services.is_empty() {
        let _ = writeln!(out, "  Services: {}", hospital.services.join(", "));
    }
    let _ = writeln!(out, "  Image: {}", hospital.image_url);
    if let Some(map_url) = &hospital.map_url {
        let _ = writeln!(out, "  Map: {map_url}");
    }
    out
}
