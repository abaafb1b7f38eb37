//! Payload shapes carried in the `data` field of webhook events.
//!
//! Each struct holds only the identifiers and status relevant to one
//! notification; fetch the full resource through the API when more detail is
//! needed. Status values are kept as strings so new server-side states do not
//! break decoding.

use serde::{Deserialize, Serialize};

// ============================================================================
// Accounts
// ============================================================================

/// Payload of `account.created`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountCreated {
    /// The new account.
    #[serde(rename = "accountID")]
    pub account_id: String,
}

/// Payload of `account.updated`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountUpdated {
    /// The updated account.
    #[serde(rename = "accountID")]
    pub account_id: String,
    /// The caller-assigned id of the account, if any.
    #[serde(rename = "foreignID", default, skip_serializing_if = "Option::is_none")]
    pub foreign_id: Option<String>,
}

/// Payload of `account.disconnected`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountDisconnected {
    /// The disconnected account.
    #[serde(rename = "accountID")]
    pub account_id: String,
    /// The caller-assigned id of the account, if any.
    #[serde(rename = "foreignID", default, skip_serializing_if = "Option::is_none")]
    pub foreign_id: Option<String>,
}

/// Payload of `capability.requested`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilityRequested {
    /// The account requesting the capability.
    #[serde(rename = "accountID")]
    pub account_id: String,
    /// The capability name, for example `transfers`.
    #[serde(rename = "capabilityID")]
    pub capability_id: String,
}

/// Payload of `capability.updated`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilityUpdated {
    /// The account holding the capability.
    #[serde(rename = "accountID")]
    pub account_id: String,
    /// The capability name.
    #[serde(rename = "capabilityID")]
    pub capability_id: String,
    /// The caller-assigned id of the account, if any.
    #[serde(rename = "foreignID", default, skip_serializing_if = "Option::is_none")]
    pub foreign_id: Option<String>,
    /// The new capability status.
    pub status: String,
}

/// Payload of `networkID.updated`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkIdUpdated {
    /// The account whose card network ids changed.
    #[serde(rename = "accountID")]
    pub account_id: String,
    /// Visa merchant id.
    #[serde(rename = "visaMID", default, skip_serializing_if = "Option::is_none")]
    pub visa_mid: Option<String>,
    /// Mastercard merchant id.
    #[serde(rename = "mastercardMID", default, skip_serializing_if = "Option::is_none")]
    pub mastercard_mid: Option<String>,
    /// Discover merchant id.
    #[serde(rename = "discoverMID", default, skip_serializing_if = "Option::is_none")]
    pub discover_mid: Option<String>,
}

/// Payload of `representative.created`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepresentativeCreated {
    /// The new representative.
    #[serde(rename = "representativeID")]
    pub representative_id: String,
    /// The business account it belongs to.
    #[serde(rename = "accountID")]
    pub account_id: String,
}

/// Payload of `representative.updated`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepresentativeUpdated {
    /// The updated representative.
    #[serde(rename = "representativeID")]
    pub representative_id: String,
    /// The business account it belongs to.
    #[serde(rename = "accountID")]
    pub account_id: String,
}

/// Payload of `representative.deleted`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepresentativeDeleted {
    /// The deleted representative.
    #[serde(rename = "representativeID")]
    pub representative_id: String,
    /// The business account it belonged to.
    #[serde(rename = "accountID")]
    pub account_id: String,
}

// ============================================================================
// Bank accounts, cards and payment methods
// ============================================================================

/// Rail-specific detail attached to a failed bank account verification.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExceptionDetails {
    /// ACH return code, for example `R03`.
    #[serde(rename = "achReturnCode", default, skip_serializing_if = "Option::is_none")]
    pub ach_return_code: Option<String>,
    /// RTP rejection code, for example `AC04`.
    #[serde(rename = "rtpRejectionCode", default, skip_serializing_if = "Option::is_none")]
    pub rtp_rejection_code: Option<String>,
    /// Human-readable description.
    pub description: String,
}

/// Payload of `bankAccount.created`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankAccountCreated {
    /// The new bank account.
    #[serde(rename = "bankAccountID")]
    pub bank_account_id: String,
    /// The owning account.
    #[serde(rename = "accountID")]
    pub account_id: String,
}

/// Payload of `bankAccount.updated`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankAccountUpdated {
    /// The updated bank account.
    #[serde(rename = "bankAccountID")]
    pub bank_account_id: String,
    /// The owning account.
    #[serde(rename = "accountID")]
    pub account_id: String,
    /// The new verification status.
    pub status: String,
    /// Why the status changed.
    #[serde(rename = "statusReason", default, skip_serializing_if = "Option::is_none")]
    pub status_reason: Option<String>,
    /// Rail detail when the status reflects a failure.
    #[serde(rename = "exceptionDetails", default, skip_serializing_if = "Option::is_none")]
    pub exception_details: Option<ExceptionDetails>,
}

/// Payload of `bankAccount.deleted`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankAccountDeleted {
    /// The deleted bank account.
    #[serde(rename = "bankAccountID")]
    pub bank_account_id: String,
    /// The owning account.
    #[serde(rename = "accountID")]
    pub account_id: String,
}

/// Payload of `card.autoUpdated`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardAutoUpdated {
    /// The updated card.
    #[serde(rename = "cardID")]
    pub card_id: String,
    /// The owning account.
    #[serde(rename = "accountID")]
    pub account_id: String,
    /// What the card network changed, for example `number-update`.
    #[serde(rename = "updateType")]
    pub update_type: String,
}

/// Payload of `paymentMethod.enabled`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentMethodEnabled {
    /// The payment method.
    #[serde(rename = "paymentMethodID")]
    pub payment_method_id: String,
    /// The owning account.
    #[serde(rename = "accountID")]
    pub account_id: String,
    /// The bank account, card or wallet behind the payment method.
    #[serde(rename = "sourceID")]
    pub source_id: String,
}

/// Payload of `paymentMethod.disabled`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentMethodDisabled {
    /// The payment method.
    #[serde(rename = "paymentMethodID")]
    pub payment_method_id: String,
    /// The owning account.
    #[serde(rename = "accountID")]
    pub account_id: String,
    /// The bank account, card or wallet behind the payment method.
    #[serde(rename = "sourceID")]
    pub source_id: String,
}

// ============================================================================
// Transfers
// ============================================================================

/// One side of a transfer as reported in transfer events.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferParty {
    /// The account on this side.
    #[serde(rename = "accountID")]
    pub account_id: String,
    /// The payment method used.
    #[serde(rename = "paymentMethodID")]
    pub payment_method_id: String,
    /// The payment method type, for example `ach-debit-fund`.
    #[serde(rename = "paymentMethodType")]
    pub payment_method_type: String,
}

/// Payload of `transfer.created`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferCreated {
    /// The account that created the transfer.
    #[serde(rename = "accountID")]
    pub account_id: String,
    /// The new transfer.
    #[serde(rename = "transferID")]
    pub transfer_id: String,
    /// Initial transfer status.
    pub status: String,
    /// The caller-assigned id of the transfer, if any.
    #[serde(rename = "foreignID", default, skip_serializing_if = "Option::is_none")]
    pub foreign_id: Option<String>,
}

/// Payload of `transfer.updated`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferUpdated {
    /// The account that created the transfer.
    #[serde(rename = "accountID")]
    pub account_id: String,
    /// The updated transfer.
    #[serde(rename = "transferID")]
    pub transfer_id: String,
    /// New transfer status.
    pub status: String,
    /// The caller-assigned id of the transfer, if any.
    #[serde(rename = "foreignID", default, skip_serializing_if = "Option::is_none")]
    pub foreign_id: Option<String>,
    /// Source side.
    pub source: TransferParty,
    /// Destination side.
    pub destination: TransferParty,
}

/// Payload of `cancellation.created`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancellationCreated {
    /// The cancellation.
    #[serde(rename = "cancellationID")]
    pub cancellation_id: String,
    /// The transfer being canceled.
    #[serde(rename = "transferID")]
    pub transfer_id: String,
    /// Cancellation status.
    pub status: String,
}

/// Payload of `cancellation.updated`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancellationUpdated {
    /// The cancellation.
    #[serde(rename = "cancellationID")]
    pub cancellation_id: String,
    /// The transfer being canceled.
    #[serde(rename = "transferID")]
    pub transfer_id: String,
    /// Cancellation status.
    pub status: String,
}

/// Payload of `refund.created`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefundCreated {
    /// The account that owns the transfer.
    #[serde(rename = "accountID")]
    pub account_id: String,
    /// The refunded transfer.
    #[serde(rename = "transferID")]
    pub transfer_id: String,
    /// The refund.
    #[serde(rename = "refundID")]
    pub refund_id: String,
}

/// Payload of `refund.updated`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefundUpdated {
    /// The account that owns the transfer.
    #[serde(rename = "accountID")]
    pub account_id: String,
    /// The refunded transfer.
    #[serde(rename = "transferID")]
    pub transfer_id: String,
    /// The refund.
    #[serde(rename = "refundID")]
    pub refund_id: String,
    /// Refund status.
    pub status: String,
}

/// Payload of `dispute.created`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisputeCreated {
    /// The merchant account.
    #[serde(rename = "accountID")]
    pub account_id: String,
    /// The disputed transfer.
    #[serde(rename = "transferID")]
    pub transfer_id: String,
    /// The card transaction, if the dispute is tied to one.
    #[serde(rename = "transactionID", default, skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    /// The dispute.
    #[serde(rename = "disputeID")]
    pub dispute_id: String,
    /// Dispute status.
    pub status: String,
}

/// Payload of `dispute.updated`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisputeUpdated {
    /// The merchant account.
    #[serde(rename = "accountID")]
    pub account_id: String,
    /// The disputed transfer.
    #[serde(rename = "transferID")]
    pub transfer_id: String,
    /// The card transaction, if the dispute is tied to one.
    #[serde(rename = "transactionID", default, skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    /// The dispute.
    #[serde(rename = "disputeID")]
    pub dispute_id: String,
    /// Dispute status.
    pub status: String,
}

// ============================================================================
// Wallets and sweeps
// ============================================================================

/// A wallet balance snapshot.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletBalance {
    /// ISO 4217 currency code.
    pub currency: String,
    /// Amount in the smallest currency unit.
    pub value: i64,
    /// Decimal rendering of the amount, for example `12.34`.
    #[serde(rename = "valueDecimal")]
    pub value_decimal: String,
}

/// Payload of `balance.updated`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceUpdated {
    /// The wallet whose balance changed.
    #[serde(rename = "walletID")]
    pub wallet_id: String,
    /// The transaction that changed it.
    #[serde(rename = "transactionID")]
    pub transaction_id: String,
}

/// Payload of `wallet.updated`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletUpdated {
    /// The wallet.
    #[serde(rename = "walletID")]
    pub wallet_id: String,
    /// The owning account.
    #[serde(rename = "accountID")]
    pub account_id: String,
    /// Wallet status.
    pub status: String,
}

/// Payload of `walletTransaction.updated`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletTransactionUpdated {
    /// The owning account.
    #[serde(rename = "accountID")]
    pub account_id: String,
    /// The wallet.
    #[serde(rename = "walletID")]
    pub wallet_id: String,
    /// The transaction.
    #[serde(rename = "transactionID")]
    pub transaction_id: String,
    /// Transaction status.
    pub status: String,
    /// Available balance after the transaction, once settled.
    #[serde(rename = "availableBalance", default, skip_serializing_if = "Option::is_none")]
    pub available_balance: Option<WalletBalance>,
}

/// Payload of `sweep.created`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepCreated {
    /// The swept wallet.
    #[serde(rename = "walletID")]
    pub wallet_id: String,
    /// The sweep.
    #[serde(rename = "sweepID")]
    pub sweep_id: String,
}

/// Payload of `sweep.updated`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepUpdated {
    /// The swept wallet.
    #[serde(rename = "walletID")]
    pub wallet_id: String,
    /// The sweep.
    #[serde(rename = "sweepID")]
    pub sweep_id: String,
    /// Sweep status.
    pub status: String,
    /// The transfer that moved the funds, once created.
    #[serde(rename = "transferID", default, skip_serializing_if = "Option::is_none")]
    pub transfer_id: Option<String>,
}

// ============================================================================
// Billing, invoices, terminals and support
// ============================================================================

/// Payload of `billingStatement.created`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingStatementCreated {
    /// The statement.
    #[serde(rename = "statementID")]
    pub statement_id: String,
}

/// Payload of `invoice.created`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceCreated {
    /// The billed account.
    #[serde(rename = "accountID")]
    pub account_id: String,
    /// The invoice.
    #[serde(rename = "invoiceID")]
    pub invoice_id: String,
    /// Invoice status.
    pub status: String,
}

/// Payload of `invoice.updated`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceUpdated {
    /// The billed account.
    #[serde(rename = "accountID")]
    pub account_id: String,
    /// The invoice.
    #[serde(rename = "invoiceID")]
    pub invoice_id: String,
    /// Invoice status.
    pub status: String,
}

/// Payload of `terminalApplication.created`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerminalApplicationCreated {
    /// The terminal application.
    #[serde(rename = "terminalApplicationID")]
    pub terminal_application_id: String,
    /// Review status.
    pub status: String,
}

/// Payload of `terminalApplication.updated`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerminalApplicationUpdated {
    /// The terminal application.
    #[serde(rename = "terminalApplicationID")]
    pub terminal_application_id: String,
    /// Review status.
    pub status: String,
    /// Why the application was rejected, if it was.
    #[serde(rename = "failureReason", default, skip_serializing_if = "Option::is_none")]
    pub failure_reason: Option<String>,
}

/// Payload of `ticket.created`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketCreated {
    /// The account that opened the ticket.
    #[serde(rename = "accountID")]
    pub account_id: String,
    /// The support ticket.
    #[serde(rename = "ticketID")]
    pub ticket_id: String,
}

/// Payload of `ticket.updated`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketUpdated {
    /// The account that opened the ticket.
    #[serde(rename = "accountID")]
    pub account_id: String,
    /// The support ticket.
    #[serde(rename = "ticketID")]
    pub ticket_id: String,
    /// Ticket status.
    pub status: String,
}
