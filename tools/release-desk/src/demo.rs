//! Demo ledger for running the desk without a ledger file.

use chrono::Utc;
use release_session::{
    AllotmentId, AllotmentRef, Amount, AssignmentRow, BeneficiaryCode, BeneficiaryId,
    BeneficiaryStatus, LedgerDocument, Money,
};

const BENEFICIARIES: [(&str, &str, &str, &str); 12] = [
    ("Maria", "Santos", "Poblacion", "Senior Citizen"),
    ("Jose", "Reyes", "San Roque", "None"),
    ("Ana", "Cruz", "Bagong Silang", "Solo Parent"),
    ("Roberto", "Bautista", "Mabini", "PWD"),
    ("Lorna", "Dizon", "Poblacion", "None"),
    ("Ramon", "Garcia", "San Isidro", "Farmer"),
    ("Teresita", "Mendoza", "Mabini", "Senior Citizen"),
    ("Eduardo", "Villanueva", "San Roque", "Fisherfolk"),
    ("Cristina", "Ramos", "Bagong Silang", "None"),
    ("Danilo", "Aquino", "San Isidro", "Farmer"),
    ("Rosario", "Navarro", "Poblacion", "Solo Parent"),
    ("Fernando", "Torres", "Mabini", "None"),
];

fn code_for(id: u64) -> BeneficiaryCode {
    BeneficiaryCode::new(format!("BENE-{id:04}"))
}

fn row(
    allotment: u64,
    index: usize,
    share: Amount,
    status: BeneficiaryStatus,
    released: bool,
) -> AssignmentRow {
    let (first, last, barangay, classification) = BENEFICIARIES[index];
    let id = index as u64 + 1;
    AssignmentRow {
        allotment_id: AllotmentId(allotment),
        beneficiary_id: BeneficiaryId(id),
        code: Some(code_for(id)),
        first_name: first.to_string(),
        last_name: last.to_string(),
        barangay: barangay.to_string(),
        classification: classification.to_string(),
        status,
        share,
        released,
        released_at: released.then(Utc::now),
    }
}

/// Three allotments: a cash project with two releases already done, an
/// in-kind project, and one with nobody assigned yet.
pub fn demo_document() -> LedgerDocument {
    let allotments = vec![
        AllotmentRef {
            id: AllotmentId(1),
            project_name: "Educational Assistance 2024".to_string(),
            company: "Municipal Government".to_string(),
            department: "Mayor's Office".to_string(),
            source_of_fund: "Special Education Fund".to_string(),
            total_budget: Amount::money(Money::from_pesos(50_000)),
        },
        AllotmentRef {
            id: AllotmentId(2),
            project_name: "Rice Subsidy Program".to_string(),
            company: String::new(),
            department: "Municipal Agriculture Office".to_string(),
            source_of_fund: "Provincial Grant".to_string(),
            total_budget: Amount::in_kind(250, "kg"),
        },
        AllotmentRef {
            id: AllotmentId(3),
            project_name: "Medical Assistance".to_string(),
            company: String::new(),
            department: "Rural Health Unit".to_string(),
            source_of_fund: "General Fund".to_string(),
            total_budget: Amount::money(Money::from_pesos(30_000)),
        },
    ];

    let mut assignments = Vec::new();
    for index in 0..BENEFICIARIES.len() {
        // Last two are still awaiting validation.
        let status = if index < 10 {
            BeneficiaryStatus::Endorsed
        } else {
            BeneficiaryStatus::Pending
        };
        assignments.push(row(
            1,
            index,
            Amount::money(Money::from_pesos(5_000)),
            status,
            matches!(index, 2 | 6),
        ));
        if index < 10 {
            assignments.push(row(
                2,
                index,
                Amount::in_kind(25, "kg"),
                BeneficiaryStatus::Endorsed,
                false,
            ));
        }
    }

    LedgerDocument {
        allotments,
        assignments,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_rosters() {
        let doc = demo_document();
        let cash = doc.roster(AllotmentId(1)).unwrap();
        let rice = doc.roster(AllotmentId(2)).unwrap();

        assert_eq!(cash.len(), 10);
        assert_eq!(cash.iter().filter(|e| e.released).count(), 2);
        assert_eq!(rice.len(), 10);
        assert!(doc.roster(AllotmentId(3)).unwrap().is_empty());
    }

    #[test]
    fn test_demo_shares_match_budget_kind() {
        let doc = demo_document();
        for allotment in doc.allotments() {
            let roster = doc.roster(allotment.id).unwrap();
            release_session::invariant_share_matches_budget(&allotment, &roster).unwrap();
        }
    }
}
