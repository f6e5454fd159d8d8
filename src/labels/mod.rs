
use std::collections::HashMap;
use std::sync::LazyLock;

/// Status value marking a successfully settled transaction.
pub const POSTED_STATUS: &str = "Posted";

const STATUS_LABELS: &[(&str, &str)] = &[
    ("Declined", "Declined"),
    ("Rejected", "Rejected"),
    ("Returned", "Returned"),
    ("Posted", "Posted")
];

// Display labels carry a leading space so they concatenate cleanly after a
// status label.
const SUB_STATUS_LABELS: &[(&str, &str)] = &[
    ("Duplication", " Duplication"),
    ("No response from Beneficiary", " No Response"),
    ("Amount is invalid or missing", " Amount Invalid"),
    ("Already returned original SCT", " Already Returned"),
    ("Account number is invalid or missing", " Account Invalid"),
    ("Account currency is invalid or missing", " Currency Invalid"),
    ("Payment is a duplicate of another payment", " Duplicate Payment"),
    ("Reason has not been specified by end customer", " Reason Not Specified"),
    ("Creditor account number invalid or missing", " Creditor Account Invalid"),
    (
        "Specific transaction/message amount is greater than allowed maximum",
        " Amount Exceed"
    ),
    (
        "Transaction forbidden on this type of account (formerly No Agreement)",
        " Transaction Forbidden"
    ),
    (
        "Account specified is blocked, prohibiting posting of transactions against it",
        " Account Blocked"
    ),
    (
        "Account number specified has been closed on the bank of accounts books",
        " Account Specified Closed"
    ),
    (
        "Cancellation requested following technical problems resulting in an erroneous transaction",
        " Technical Problems"
    ),
    (
        "Specification of the debtor’s name and/or address needed for regulatory requirements is insufficient or missing",
        " Missing Debtor Name Or Address"
    ),
    ("Success", " Success"),
    ("Invalid value", " Invalid Value"),
    ("Lack of funds", " Lack of Funds"),
    ("Wrong rejection motive", " Wrong motive"),
    ("Invalid value date", " Invalid value date"),
    ("Payment is not found", " Payment not Found"),
    ("Document was rejected by timeout", " Timeout"),
    ("On-us dynamic QR code payment", " DQRC Payment"),
    ("Cancellation requested by the Debtor", " Cancelled by Debtor"),
    ("Partial return requested by customer", " Partial return by Customer"),
    ("Reason has not been specified by agent", " Reason not specified by Agent"),
    ("Return for original payment is already registered", " Return already Registered"),
    (
        "Original credit transfer never received",
        " Original credit transfer never received"
    ),
    (
        "Amount of funds available to cover specified message amount is insufficient",
        " Amount Insufficient"
    ),
    (
        "Transaction type not supported/authorized on this account",
        " Transaction not supported on this account"
    ),
    (
        "Invalid value customer identification (such as CNIC, NTN, POC, etc.)",
        " Invalid Customer Identification"
    ),
    (
        "Specification of the debtors account or unique identification needed for reasons of regulatory requirements is insufficient or missing",
        " Regulatory requirements are insufficient"
    )
];

static STATUSES: LazyLock<HashMap<&str, &str>> =
    LazyLock::new(|| STATUS_LABELS.iter().copied().collect());

static SUB_STATUSES: LazyLock<HashMap<&str, &str>> =
    LazyLock::new(|| SUB_STATUS_LABELS.iter().copied().collect());

/// Display label for a transaction status, if the status is part of the
/// known vocabulary.
pub fn status_label(status: &str) -> Option<&'static str> {
    STATUSES.get(status).copied()
}

/// Display label for an already-normalized reject motive.
pub fn sub_status_label(motive: &str) -> Option<&'static str> {
    SUB_STATUSES.get(motive).copied()
}

/// Strips the trailing `.`-separated qualifier segment and any literal
/// single quotes from a raw reject-motive description.
///
/// Upstream extracts render motives like `'Lack of funds'.AM04`; the
/// dictionary keys are the bare descriptions.
pub fn normalize_motive(motive: &str) -> String {
    let stem = match motive.rfind('.') {
        Some(index) => &motive[..index],
        None => motive
    };

    stem.replace('\'', "")
}

/// Derives the report column label for a (status, reject motive) pair.
///
/// Unmapped halves contribute nothing, so a fully unmapped pair collapses to
/// an empty label. Collisions between such labels are resolved by the
/// creditor aggregator's label policy.
pub fn derived_label(status: &str, motive: &str) -> String {
    let mut label = String::new();

    if let Some(mapped) = status_label(status) {
        label.push_str(mapped);
    }

    if let Some(mapped) = sub_status_label(&normalize_motive(motive)) {
        label.push_str(mapped);
    }

    label
}
