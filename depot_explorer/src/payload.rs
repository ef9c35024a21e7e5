//! Scannable identity payload for boxes.

use crate::data::BoxRecord;
use crate::layout::Placement;

/// `CODE:<code>;PRODUCT:<label>;QTY:<quantity>`; a missing label encodes as empty.
pub fn identity_payload(record: &BoxRecord) -> String {
    format!(
        "CODE:{};PRODUCT:{};QTY:{}",
        record.box_code,
        record.product_label(),
        record.quantity
    )
}

/// Payload for an occupied placement; empty placements get no code.
pub fn placement_payload(placement: &Placement) -> Option<String> {
    placement.occupant.as_ref().map(identity_payload)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(product_name: Option<&str>) -> BoxRecord {
        BoxRecord {
            id: 1,
            box_code: "BOX-AB12CD34".into(),
            product_name: product_name.map(str::to_string),
            quantity: 7,
            slot_id: Some(3),
        }
    }

    #[test]
    fn encodes_code_product_and_quantity() {
        assert_eq!(
            identity_payload(&record(Some("Widget"))),
            "CODE:BOX-AB12CD34;PRODUCT:Widget;QTY:7"
        );
    }

    #[test]
    fn missing_product_encodes_empty() {
        assert_eq!(
            identity_payload(&record(None)),
            "CODE:BOX-AB12CD34;PRODUCT:;QTY:7"
        );
    }
}
