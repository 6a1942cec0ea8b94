use crate::model::{ChargeCategory, ReconciledShipment, SummaryRow};

/// Category of one shipment by the sign of billed − expected.
pub fn categorize(difference_paise: i64) -> ChargeCategory {
    match difference_paise {
        0 => ChargeCategory::Correct,
        d if d > 0 => ChargeCategory::Overcharged,
        _ => ChargeCategory::Undercharged,
    }
}

/// Roll reconciled shipments into the three-row summary.
///
/// The categories partition the row set exactly: every shipment lands in
/// one bucket and counts sum to the total. Correct rows contribute their
/// expected charge (their difference is zero), overcharges are reported as
/// an absolute total, undercharges stay signed negative.
pub fn summarize(shipments: &[ReconciledShipment]) -> Vec<SummaryRow> {
    let mut correct = (0usize, 0i64);
    let mut over = (0usize, 0i64);
    let mut under = (0usize, 0i64);

    for s in shipments {
        match categorize(s.difference_paise) {
            ChargeCategory::Correct => {
                correct.0 += 1;
                correct.1 += s.expected_paise;
            }
            ChargeCategory::Overcharged => {
                over.0 += 1;
                over.1 += s.difference_paise;
            }
            ChargeCategory::Undercharged => {
                under.0 += 1;
                under.1 += s.difference_paise;
            }
        }
    }

    vec![
        row(ChargeCategory::Correct, correct),
        row(ChargeCategory::Overcharged, over),
        row(ChargeCategory::Undercharged, under),
    ]
}

fn row(category: ChargeCategory, (count, amount_paise): (usize, i64)) -> SummaryRow {
    SummaryRow {
        category,
        description: category.description(),
        count,
        amount_paise,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ShipmentType;
    use crate::slab::WeightSlab;

    fn shipment(order_id: &str, expected: i64, billed: i64) -> ReconciledShipment {
        ReconciledShipment {
            order_id: order_id.into(),
            sku: "s1".into(),
            quantity: 1,
            zone: "a".into(),
            courier_zone: "a".into(),
            expected_slab: WeightSlab::from_kg(1.0),
            courier_slab: WeightSlab::from_kg(1.0),
            shipment_type: ShipmentType::Forward,
            expected_paise: expected,
            billed_paise: billed,
            difference_paise: billed - expected,
        }
    }

    #[test]
    fn sign_drives_the_category() {
        assert_eq!(categorize(0), ChargeCategory::Correct);
        assert_eq!(categorize(1), ChargeCategory::Overcharged);
        assert_eq!(categorize(-1), ChargeCategory::Undercharged);
    }

    #[test]
    fn partition_is_complete() {
        let shipments = vec![
            shipment("o1", 5000, 5000),
            shipment("o2", 5000, 6100),
            shipment("o3", 5000, 4000),
            shipment("o4", 5000, 5000),
            shipment("o5", 5000, 7000),
        ];
        let summary = summarize(&shipments);
        assert_eq!(summary.len(), 3);
        let total: usize = summary.iter().map(|r| r.count).sum();
        assert_eq!(total, shipments.len());
    }

    #[test]
    fn amount_conventions() {
        let shipments = vec![
            shipment("o1", 5000, 5000),
            shipment("o2", 4500, 4500),
            shipment("o3", 5000, 6100),
            shipment("o4", 5000, 3900),
        ];
        let summary = summarize(&shipments);

        // Correct bucket totals expected charges, not (zero) differences.
        assert_eq!(summary[0].category, ChargeCategory::Correct);
        assert_eq!(summary[0].count, 2);
        assert_eq!(summary[0].amount_paise, 9500);

        assert_eq!(summary[1].category, ChargeCategory::Overcharged);
        assert_eq!(summary[1].amount_paise, 1100);
        assert!(summary[1].amount_paise >= 0);

        // Undercharged total stays signed negative.
        assert_eq!(summary[2].category, ChargeCategory::Undercharged);
        assert_eq!(summary[2].amount_paise, -1100);
    }

    #[test]
    fn empty_input_yields_three_zero_rows() {
        let summary = summarize(&[]);
        assert_eq!(summary.len(), 3);
        assert!(summary.iter().all(|r| r.count == 0 && r.amount_paise == 0));
    }
}
