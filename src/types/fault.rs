//! Failure payloads: captured panics and reclassified error returns.
//!
//! A normalized failure arrives one of two ways. Either the computation
//! panicked, in which case the executor captured the unwind and holds
//! the payload verbatim in a [`PanicPayload`], or the computation
//! returned an error-shaped value and the active policy reclassified it
//! as a failure. [`Fault`] records which path was taken without
//! modifying the payload itself.

use std::any::Any;
use std::fmt;

/// The failure payload of a normalized computation.
///
/// The wrapped value is the original panic payload or the original
/// returned error, unmodified. No wrapping, no message rewriting.
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum Fault<E> {
    /// The computation panicked; the unwind payload was captured.
    #[error("computation panicked: {0}")]
    Panicked(PanicPayload),
    /// The computation returned an error-shaped value that the active
    /// policy reclassified as a failure.
    #[error("computation returned an error: {0}")]
    Returned(E),
}

impl<E> Fault<E> {
    /// Returns true if the failure came from a captured panic.
    #[must_use]
    pub const fn is_panic(&self) -> bool {
        matches!(self, Self::Panicked(_))
    }

    /// Returns true if the failure came from a reclassified return.
    #[must_use]
    pub const fn is_returned(&self) -> bool {
        matches!(self, Self::Returned(_))
    }

    /// Returns the captured panic payload, if any.
    #[must_use]
    pub const fn panic_payload(&self) -> Option<&PanicPayload> {
        match self {
            Self::Panicked(payload) => Some(payload),
            Self::Returned(_) => None,
        }
    }

    /// Returns the reclassified error value, if any.
    #[must_use]
    pub const fn returned(&self) -> Option<&E> {
        match self {
            Self::Panicked(_) => None,
            Self::Returned(error) => Some(error),
        }
    }

    /// Consumes the fault, returning the reclassified error value.
    #[must_use]
    pub fn into_returned(self) -> Option<E> {
        match self {
            Self::Panicked(_) => None,
            Self::Returned(error) => Some(error),
        }
    }
}

/// A captured unwind payload.
///
/// Holds the exact boxed value the panic carried. When the payload is a
/// `&str` or `String` (the payloads `panic!` produces), a message is
/// extracted at capture time for display; any other payload keeps a
/// placeholder message and remains reachable through
/// [`PanicPayload::payload`] and [`PanicPayload::downcast_ref`].
pub struct PanicPayload {
    message: Option<String>,
    payload: Box<dyn Any + Send>,
}

impl PanicPayload {
    /// Creates a payload from a message string.
    ///
    /// The boxed payload is the message itself, so `downcast_ref::<String>()`
    /// behaves the same as for a captured `panic!("{msg}")`.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            message: Some(message.clone()),
            payload: Box::new(message),
        }
    }

    /// Wraps the payload carried by an unwind, verbatim.
    #[must_use]
    pub fn from_unwind(payload: Box<dyn Any + Send>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&'static str>() {
            Some((*s).to_string())
        } else {
            payload.downcast_ref::<String>().cloned()
        };
        Self { message, payload }
    }

    /// Returns the extracted message, if the payload carried one.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Returns the raw payload for inspection.
    #[must_use]
    pub fn payload(&self) -> &(dyn Any + Send) {
        &*self.payload
    }

    /// Attempts to view the payload as a concrete type.
    #[must_use]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.payload.downcast_ref::<T>()
    }

    /// Consumes the wrapper, returning the payload exactly as it was
    /// thrown. Suitable for `std::panic::resume_unwind`.
    #[must_use]
    pub fn into_payload(self) -> Box<dyn Any + Send> {
        self.payload
    }
}

impl fmt::Display for PanicPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(message) => write!(f, "{message}"),
            None => write!(f, "<non-string panic payload>"),
        }
    }
}

impl fmt::Debug for PanicPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PanicPayload")
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}

/// Compares extracted messages only. Two payloads with distinct
/// non-string contents compare equal when both lack a message.
impl PartialEq for PanicPayload {
    fn eq(&self, other: &Self) -> bool {
        self.message == other.message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_extraction_from_static_str() {
        let payload = PanicPayload::from_unwind(Box::new("boom"));
        assert_eq!(payload.message(), Some("boom"));
        assert_eq!(payload.to_string(), "boom");
    }

    #[test]
    fn message_extraction_from_string() {
        let payload = PanicPayload::from_unwind(Box::new(String::from("dynamic")));
        assert_eq!(payload.message(), Some("dynamic"));
    }

    #[test]
    fn non_string_payload_is_kept_verbatim() {
        let payload = PanicPayload::from_unwind(Box::new(1234_u64));
        assert_eq!(payload.message(), None);
        assert_eq!(payload.downcast_ref::<u64>(), Some(&1234));
        assert_eq!(payload.to_string(), "<non-string panic payload>");
    }

    #[test]
    fn into_payload_returns_the_original_box() {
        let payload = PanicPayload::from_unwind(Box::new(5_i32));
        let raw = payload.into_payload();
        assert_eq!(raw.downcast_ref::<i32>(), Some(&5));
    }

    #[test]
    fn fault_accessors() {
        let fault: Fault<&str> = Fault::Panicked(PanicPayload::new("p"));
        assert!(fault.is_panic());
        assert!(!fault.is_returned());
        assert!(fault.panic_payload().is_some());
        assert_eq!(fault.returned(), None);

        let fault: Fault<&str> = Fault::Returned("e");
        assert!(fault.is_returned());
        assert_eq!(fault.into_returned(), Some("e"));
    }

    #[test]
    fn fault_display() {
        let fault: Fault<String> = Fault::Panicked(PanicPayload::new("kaput"));
        assert_eq!(fault.to_string(), "computation panicked: kaput");

        let fault: Fault<String> = Fault::Returned("bad input".into());
        assert_eq!(fault.to_string(), "computation returned an error: bad input");
    }
}
