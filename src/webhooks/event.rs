//! Webhook event envelopes and typed payload dispatch.
//!
//! An [`Event`] is the decoded envelope of a verified delivery:
//!
//! ```json
//! {"eventID": "...", "type": "transfer.updated", "data": {...}, "createdOn": "2024-04-26T21:20:55Z"}
//! ```
//!
//! The `type` tag must be one of the [`EventType`] variants; any other tag
//! fails the parse with [`EventError::UnknownEventType`]. The `data` field
//! stays raw until a typed accessor is called. Each accessor checks the tag
//! first, so the payload can only ever decode into the one shape matching it.
//!
//! # Example
//!
//! ```rust
//! use chrono::Utc;
//! use moov_api::webhooks::{payloads, Event, EventError, EventPayload, EventType};
//!
//! let payload = EventPayload::AccountCreated(payloads::AccountCreated {
//!     account_id: "acc-1".to_string(),
//! });
//! let event = Event::from_payload("evt-1", Utc::now(), &payload).unwrap();
//!
//! assert_eq!(event.event_type(), EventType::AccountCreated);
//! assert_eq!(event.account_created().unwrap().account_id, "acc-1");
//! assert!(matches!(
//!     event.transfer_created(),
//!     Err(EventError::TypeMismatch { .. })
//! ));
//! ```

use std::fmt;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;

use crate::webhooks::errors::EventError;
use crate::webhooks::payloads;

/// Declares the closed event catalogue.
///
/// Every entry produces an [`EventType`] variant, its wire tag, an
/// [`EventPayload`] variant wrapping the payload struct of the same name, and
/// a typed accessor on [`Event`]. One entry is the only place a tag is tied
/// to its decoder.
macro_rules! event_catalogue {
    ($( $(#[$meta:meta])* $variant:ident => $tag:literal, $accessor:ident; )+) => {
        /// The closed set of webhook event types.
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub enum EventType {
            $( $(#[$meta])* $variant, )+
        }

        impl EventType {
            /// Every event type, in catalogue order.
            pub const ALL: &'static [Self] = &[ $( Self::$variant, )+ ];

            /// Returns the wire tag, for example `transfer.created`.
            #[must_use]
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $( Self::$variant => $tag, )+
                }
            }

            /// Looks up an event type by its wire tag. Tags are case-sensitive.
            #[must_use]
            pub fn from_tag(tag: &str) -> Option<Self> {
                match tag {
                    $( $tag => Some(Self::$variant), )+
                    _ => None,
                }
            }
        }

        /// A decoded event payload, one variant per [`EventType`].
        #[derive(Clone, Debug, PartialEq, Eq)]
        pub enum EventPayload {
            $(
                #[doc = concat!("Payload of `", $tag, "`.")]
                $variant(payloads::$variant),
            )+
        }

        impl EventPayload {
            /// Returns the event type this payload belongs to.
            #[must_use]
            pub const fn event_type(&self) -> EventType {
                match self {
                    $( Self::$variant(_) => EventType::$variant, )+
                }
            }

            fn to_raw(&self) -> Result<Box<RawValue>, serde_json::Error> {
                match self {
                    $( Self::$variant(payload) => serde_json::value::to_raw_value(payload), )+
                }
            }

            #[cfg(test)]
            fn default_for(event_type: EventType) -> Self {
                match event_type {
                    $( EventType::$variant => Self::$variant(payloads::$variant::default()), )+
                }
            }
        }

        impl Event {
            /// Decodes the payload into the variant matching the event type.
            ///
            /// # Errors
            ///
            /// Returns [`EventError::Decode`] if `data` does not match the
            /// payload shape of the event type.
            pub fn payload(&self) -> Result<EventPayload, EventError> {
                Ok(match self.event_type {
                    $( EventType::$variant => EventPayload::$variant(self.decode_data()?), )+
                })
            }

            $(
                #[doc = concat!("Decodes the payload of a `", $tag, "` event.")]
                ///
                /// # Errors
                ///
                /// Returns [`EventError::TypeMismatch`] for any other event
                /// type and [`EventError::Decode`] if `data` is malformed.
                pub fn $accessor(&self) -> Result<payloads::$variant, EventError> {
                    self.decode_as(EventType::$variant)
                }
            )+
        }
    };
}

event_catalogue! {
    /// An account was created.
    AccountCreated => "account.created", account_created;
    /// An account was updated.
    AccountUpdated => "account.updated", account_updated;
    /// An account was disconnected from the platform.
    AccountDisconnected => "account.disconnected", account_disconnected;
    /// A wallet balance changed.
    BalanceUpdated => "balance.updated", balance_updated;
    /// A bank account was linked.
    BankAccountCreated => "bankAccount.created", bank_account_created;
    /// A bank account's verification status changed.
    BankAccountUpdated => "bankAccount.updated", bank_account_updated;
    /// A bank account was removed.
    BankAccountDeleted => "bankAccount.deleted", bank_account_deleted;
    /// A billing statement was issued.
    BillingStatementCreated => "billingStatement.created", billing_statement_created;
    /// A transfer cancellation was requested.
    CancellationCreated => "cancellation.created", cancellation_created;
    /// A transfer cancellation changed status.
    CancellationUpdated => "cancellation.updated", cancellation_updated;
    /// A capability was requested for an account.
    CapabilityRequested => "capability.requested", capability_requested;
    /// A capability changed status.
    CapabilityUpdated => "capability.updated", capability_updated;
    /// The card network updated a stored card.
    CardAutoUpdated => "card.autoUpdated", card_auto_updated;
    /// A dispute was opened.
    DisputeCreated => "dispute.created", dispute_created;
    /// A dispute changed status.
    DisputeUpdated => "dispute.updated", dispute_updated;
    /// An invoice was created.
    InvoiceCreated => "invoice.created", invoice_created;
    /// An invoice changed status.
    InvoiceUpdated => "invoice.updated", invoice_updated;
    /// Card network merchant ids changed.
    NetworkIdUpdated => "networkID.updated", network_id_updated;
    /// A payment method became available.
    PaymentMethodEnabled => "paymentMethod.enabled", payment_method_enabled;
    /// A payment method became unavailable.
    PaymentMethodDisabled => "paymentMethod.disabled", payment_method_disabled;
    /// A refund was initiated.
    RefundCreated => "refund.created", refund_created;
    /// A refund changed status.
    RefundUpdated => "refund.updated", refund_updated;
    /// A business representative was added.
    RepresentativeCreated => "representative.created", representative_created;
    /// A business representative was updated.
    RepresentativeUpdated => "representative.updated", representative_updated;
    /// A business representative was removed.
    RepresentativeDeleted => "representative.deleted", representative_deleted;
    /// A wallet sweep was created.
    SweepCreated => "sweep.created", sweep_created;
    /// A wallet sweep changed status.
    SweepUpdated => "sweep.updated", sweep_updated;
    /// A terminal application was submitted.
    TerminalApplicationCreated => "terminalApplication.created", terminal_application_created;
    /// A terminal application changed status.
    TerminalApplicationUpdated => "terminalApplication.updated", terminal_application_updated;
    /// A transfer was created.
    TransferCreated => "transfer.created", transfer_created;
    /// A transfer changed status.
    TransferUpdated => "transfer.updated", transfer_updated;
    /// A wallet changed status.
    WalletUpdated => "wallet.updated", wallet_updated;
    /// A wallet transaction changed status.
    WalletTransactionUpdated => "walletTransaction.updated", wallet_transaction_updated;
    /// A support ticket was opened.
    TicketCreated => "ticket.created", ticket_created;
    /// A support ticket changed status.
    TicketUpdated => "ticket.updated", ticket_updated;
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Deserialize)]
struct IncomingEnvelope {
    #[serde(rename = "eventID")]
    event_id: String,
    #[serde(rename = "type")]
    event_type: String,
    data: Box<RawValue>,
    #[serde(rename = "createdOn")]
    created_on: DateTime<Utc>,
}

#[derive(Serialize)]
struct OutgoingEnvelope<'a> {
    #[serde(rename = "eventID")]
    event_id: &'a str,
    #[serde(rename = "type")]
    event_type: &'static str,
    data: &'a RawValue,
    #[serde(rename = "createdOn")]
    created_on: &'a DateTime<Utc>,
}

/// A webhook event envelope.
///
/// Obtained from [`VerifiedWebhook::parse_event`](crate::webhooks::VerifiedWebhook::parse_event),
/// so an `Event` always comes from an authenticated delivery, or built with
/// [`Event::from_payload`] for fixtures.
#[derive(Clone, Debug)]
pub struct Event {
    event_id: String,
    event_type: EventType,
    data: Box<RawValue>,
    created_on: DateTime<Utc>,
}

impl Event {
    pub(crate) fn from_slice(body: &[u8]) -> Result<Self, EventError> {
        let envelope: IncomingEnvelope = serde_json::from_slice(body)?;
        let Some(event_type) = EventType::from_tag(&envelope.event_type) else {
            return Err(EventError::UnknownEventType {
                event_type: envelope.event_type,
            });
        };

        tracing::debug!(
            event_id = %envelope.event_id,
            event_type = %event_type,
            "Parsed webhook event"
        );

        Ok(Self {
            event_id: envelope.event_id,
            event_type,
            data: envelope.data,
            created_on: envelope.created_on,
        })
    }

    /// Builds an envelope around `payload`.
    ///
    /// # Errors
    ///
    /// Returns [`EventError::Decode`] if the payload cannot be serialized.
    pub fn from_payload(
        event_id: impl Into<String>,
        created_on: DateTime<Utc>,
        payload: &EventPayload,
    ) -> Result<Self, EventError> {
        Ok(Self {
            event_id: event_id.into(),
            event_type: payload.event_type(),
            data: payload.to_raw()?,
            created_on,
        })
    }

    /// Serializes the envelope in its wire format.
    ///
    /// # Errors
    ///
    /// Returns [`EventError::Decode`] if serialization fails.
    pub fn to_json(&self) -> Result<Vec<u8>, EventError> {
        Ok(serde_json::to_vec(&OutgoingEnvelope {
            event_id: &self.event_id,
            event_type: self.event_type.as_str(),
            data: &self.data,
            created_on: &self.created_on,
        })?)
    }

    /// Returns the event id.
    #[must_use]
    pub fn event_id(&self) -> &str {
        &self.event_id
    }

    /// Returns the event type.
    #[must_use]
    pub const fn event_type(&self) -> EventType {
        self.event_type
    }

    /// Returns when the event was created.
    #[must_use]
    pub const fn created_on(&self) -> DateTime<Utc> {
        self.created_on
    }

    /// Returns the undecoded `data` JSON.
    #[must_use]
    pub fn raw_data(&self) -> &str {
        self.data.get()
    }

    /// Decodes `data` as `T` after checking the event type is `expected`.
    ///
    /// # Errors
    ///
    /// Returns [`EventError::TypeMismatch`] if the event type differs and
    /// [`EventError::Decode`] if `data` is not a valid `T`.
    pub fn decode_as<T: DeserializeOwned>(&self, expected: EventType) -> Result<T, EventError> {
        if self.event_type != expected {
            return Err(EventError::TypeMismatch {
                expected,
                actual: self.event_type,
            });
        }
        self.decode_data()
    }

    fn decode_data<T: DeserializeOwned>(&self) -> Result<T, EventError> {
        Ok(serde_json::from_str(self.data.get())?)
    }
}
