use std::future::Future;

use super::ClientError;
use crate::models::{clamp_charge, Message, MIN_CHARGE};

/// Single-step charge operations offered by the server.
pub trait ChargeApi {
    /// Returns the charge confirmed by the server.
    fn increase(&self, id: u64) -> impl Future<Output = Result<u8, ClientError>> + Send;

    fn decrease(&self, id: u64) -> impl Future<Output = Result<u8, ClientError>> + Send;

    fn delete(&self, id: u64) -> impl Future<Output = Result<(), ClientError>> + Send;
}

/// Interactive controls of the view driving a workflow.
pub trait Controls {
    fn set_enabled(&self, enabled: bool);
}

/// Keeps controls disabled while alive.
pub struct ControlsGuard<'a, C: Controls + ?Sized> {
    controls: &'a C,
}

impl<'a, C: Controls + ?Sized> ControlsGuard<'a, C> {
    pub fn new(controls: &'a C) -> Self {
        controls.set_enabled(false);
        ControlsGuard { controls }
    }
}

impl<C: Controls + ?Sized> Drop for ControlsGuard<'_, C> {
    fn drop(&mut self) {
        self.controls.set_enabled(true);
    }
}

/// Converges a message's charge to a target through a strictly sequential
/// chain of `increase`/`decrease` calls, each awaited before the next one
/// is issued. Controls stay disabled for the whole chain.
///
/// A failed step ends the chain. The local charge keeps the last value the
/// server confirmed.
pub struct ChargeWorkflow<'a, A, C: ?Sized> {
    api: &'a A,
    controls: &'a C,
}

impl<'a, A, C> ChargeWorkflow<'a, A, C>
where
    A: ChargeApi,
    C: Controls + ?Sized,
{
    pub fn new(api: &'a A, controls: &'a C) -> Self {
        ChargeWorkflow { api, controls }
    }

    /// Drives `message.charge` to `target`, clamped into the valid range.
    pub async fn set_charge(&self, message: &mut Message, target: i64) -> Result<u8, ClientError> {
        let _guard = ControlsGuard::new(self.controls);
        self.converge(message, clamp_charge(target)).await
    }

    /// Discharges the message, then deletes it. The delete request is only
    /// issued once the server has confirmed a zero charge.
    pub async fn delete(&self, message: &mut Message) -> Result<(), ClientError> {
        let _guard = ControlsGuard::new(self.controls);
        self.converge(message, MIN_CHARGE).await?;

        match self.api.delete(message.id).await {
            Err(ClientError::Locked { charge }) => {
                tracing::warn!(message_id = message.id, charge, "message was charged again before delete");
                message.charge = charge;
                Err(ClientError::Locked { charge })
            }
            result => result,
        }
    }

    async fn converge(&self, message: &mut Message, target: u8) -> Result<u8, ClientError> {
        while message.charge != target {
            let step = if message.charge < target {
                self.api.increase(message.id).await
            } else {
                self.api.decrease(message.id).await
            };

            match step {
                Ok(charge) => {
                    tracing::debug!(message_id = message.id, charge, target, "charge step confirmed");
                    message.charge = charge;
                }
                Err(err) => {
                    tracing::warn!(message_id = message.id, charge = message.charge, target, error = %err, "charge step failed");
                    return Err(err);
                }
            }
        }
        Ok(message.charge)
    }
}
