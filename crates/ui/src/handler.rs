//! Slider input handling
//!
//! One input event: echo the value locally, post it, then show the
//! server's `change` for that vital. Failures leave the page as the echo
//! left it.

use std::future::Future;
use std::rc::Rc;

use async_trait::async_trait;
use tracing::{debug, warn};
use vitals_protocol::{Summary, UpdateResponse, VitalUpdate};

use crate::binding::{TextTarget, VitalBinding};
use crate::config::ValueEncoding;
use crate::error::UpdateError;

/// Element ids of the page-level summary targets
pub const DISEASE_TARGET_ID: &str = "disease";
pub const HEALTH_REPORT_TARGET_ID: &str = "health_report";

/// Delivers one update to the update service
#[async_trait(?Send)]
pub trait UpdateTransport {
    async fn send(&self, update: &VitalUpdate) -> Result<UpdateResponse, UpdateError>;
}

/// Optional elements receiving the response's `disease` and `health_report`
pub struct SummaryTargets<T> {
    disease: Option<T>,
    health_report: Option<T>,
}

impl<T: TextTarget> SummaryTargets<T> {
    pub const fn none() -> Self {
        Self {
            disease: None,
            health_report: None,
        }
    }

    pub fn resolve(lookup: impl Fn(&str) -> Option<T>) -> Self {
        Self {
            disease: lookup(DISEASE_TARGET_ID),
            health_report: lookup(HEALTH_REPORT_TARGET_ID),
        }
    }

    /// Resolved targets when `enabled`, otherwise none
    pub fn resolve_if(enabled: bool, lookup: impl Fn(&str) -> Option<T>) -> Self {
        if enabled {
            Self::resolve(lookup)
        } else {
            Self::none()
        }
    }

    fn apply(&self, summary: &Summary) {
        let pairs = [
            (&self.disease, &summary.disease),
            (&self.health_report, &summary.health_report),
        ];
        for (target, text) in pairs {
            if let (Some(target), Some(text)) = (target, text) {
                target.set_text(text);
            }
        }
    }
}

pub struct SliderHandler<T, X> {
    transport: Rc<X>,
    encoding: ValueEncoding,
    summary: Rc<SummaryTargets<T>>,
}

impl<T, X> SliderHandler<T, X>
where
    T: TextTarget + 'static,
    X: UpdateTransport + 'static,
{
    pub fn new(transport: X, encoding: ValueEncoding, summary: SummaryTargets<T>) -> Self {
        Self {
            transport: Rc::new(transport),
            encoding,
            summary: Rc::new(summary),
        }
    }

    /// Handle one input event.
    ///
    /// The value echo happens before this returns. The returned future
    /// performs the request and applies its response; it is independent of
    /// every other pending update, so responses apply in arrival order.
    pub fn on_input(
        &self,
        binding: Rc<VitalBinding<T>>,
        raw_value: &str,
    ) -> impl Future<Output = Result<(), UpdateError>> + 'static {
        binding.show_value(raw_value);

        let update = VitalUpdate::new(binding.id(), self.encoding.encode(raw_value));
        let transport = Rc::clone(&self.transport);
        let summary = Rc::clone(&self.summary);

        async move {
            debug!(vital = %update.vital, value = %update.value, "sending vital update");
            let result = match transport.send(&update).await {
                Ok(response) => apply_response(&binding, &summary, &response),
                Err(err) => Err(err),
            };
            match &result {
                Ok(()) => debug!(vital = %update.vital, "vital update applied"),
                Err(UpdateError::Response(err)) => debug!(vital = %update.vital, "no update: {err}"),
                Err(err) => warn!(vital = %update.vital, "vital update failed: {err}"),
            }
            result
        }
    }
}

/// Write the `change` for `binding` (and any summary) from a response
pub fn apply_response<T: TextTarget>(
    binding: &VitalBinding<T>,
    summary: &SummaryTargets<T>,
    response: &UpdateResponse,
) -> Result<(), UpdateError> {
    let change = response.change_for(binding.id())?;
    binding.show_change(&change.to_string());
    summary.apply(&response.summary());
    Ok(())
}
