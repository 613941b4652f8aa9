//! Lifecycle orchestrator
//!
//! Every operation takes its context as an `Option` so an absent sensor is
//! reported as [`LifecycleError::Null`] before anything else happens.
//! Configuration is only ever replaced with a complete, validated value:
//! a failing driver or storage call leaves the context as it was.

use heapless::String;

use calyx_hal::NvmStorage;

use crate::config::{CodecError, LifecycleConfig, SensorConfiguration};
use crate::diag::{format_message, DiagnosticSink, Level, MAX_MESSAGE_LEN};
use crate::sensor::{LifecycleState, SensorContext};
use crate::traits::{Capability, SensorDriver};

use super::LifecycleError;

/// Runs lifecycle operations and reports them to a diagnostic sink
#[derive(Debug)]
pub struct Lifecycle<S> {
    sink: S,
    config: LifecycleConfig,
}

impl<S: DiagnosticSink> Lifecycle<S> {
    /// Create an orchestrator with default settings
    pub const fn new(sink: S) -> Self {
        Self {
            sink,
            config: LifecycleConfig::new(),
        }
    }

    /// Create an orchestrator with explicit settings
    pub const fn with_config(sink: S, config: LifecycleConfig) -> Self {
        Self { sink, config }
    }

    /// Current settings
    pub fn config(&self) -> &LifecycleConfig {
        &self.config
    }

    /// The diagnostic sink
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// The diagnostic sink, mutably
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Consume the orchestrator and return the sink
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Initialize the driver of a context
    ///
    /// Calls the context's initializer with its bus and handle. On success
    /// the driver is stored and the context becomes ready; initializing a
    /// ready context replaces its driver. On failure the driver status is
    /// returned unchanged and the context is left as it was.
    ///
    /// # Errors
    /// - [`LifecycleError::Null`] if the context or its initializer is absent
    /// - [`LifecycleError::Backend`] with the initializer's status
    pub fn initialize<D: SensorDriver>(
        &mut self,
        ctx: Option<&mut SensorContext<D>>,
    ) -> Result<(), LifecycleError<D::Error>> {
        let ctx = ctx.ok_or(LifecycleError::Null)?;
        let init = ctx.init.ok_or(LifecycleError::Null)?;

        let driver = init(ctx.bus, ctx.handle).map_err(LifecycleError::Backend)?;

        let text: String<MAX_MESSAGE_LEN> = format_message(format_args!(
            "Initialized {} on {} handle {}",
            driver.name(),
            ctx.bus,
            ctx.handle
        ));
        self.sink.log(Level::Debug, &text);

        ctx.sensor = Some(driver);
        ctx.state = LifecycleState::Ready;
        Ok(())
    }

    /// Apply the context's configuration to the hardware
    ///
    /// The configuration is logged before the call, handed to the driver,
    /// and replaced with what the driver reports as actually applied. The
    /// applied configuration is logged afterwards.
    ///
    /// # Errors
    /// - [`LifecycleError::Null`] if the context is absent
    /// - [`LifecycleError::InvalidState`] if the context is not initialized
    ///   or its driver is not configurable; the configuration is unchanged
    /// - [`LifecycleError::Backend`] with the driver's status; the
    ///   configuration is unchanged
    pub fn configure<D: SensorDriver>(
        &mut self,
        ctx: Option<&mut SensorContext<D>>,
    ) -> Result<(), LifecycleError<D::Error>> {
        let ctx = ctx.ok_or(LifecycleError::Null)?;
        if ctx.state != LifecycleState::Ready {
            return Err(LifecycleError::InvalidState);
        }
        let sensor = match ctx.sensor.as_mut() {
            Some(sensor) if sensor.configurable() => sensor,
            _ => return Err(LifecycleError::InvalidState),
        };

        let level = self.config.log_level;
        let text: String<MAX_MESSAGE_LEN> = format_message(format_args!(
            "Attempting to configure {} with:",
            sensor.name()
        ));
        self.sink.log(level, &text);
        self.sink.log_configuration(level, &ctx.configuration);

        let mut applied = ctx.configuration;
        if let Err(e) = sensor.configuration_set(&mut applied) {
            let text: String<MAX_MESSAGE_LEN> =
                format_message(format_args!("Configuring {} failed", sensor.name()));
            self.sink.log(Level::Warning, &text);
            return Err(LifecycleError::Backend(e));
        }
        ctx.configuration = applied;

        self.sink.log(level, "Actual configuration:");
        self.sink.log_configuration(level, &ctx.configuration);
        Ok(())
    }

    /// Read the configuration the hardware is running with into the context
    ///
    /// # Errors
    /// Same as [`Lifecycle::configure`].
    pub fn refresh<D: SensorDriver>(
        &mut self,
        ctx: Option<&mut SensorContext<D>>,
    ) -> Result<(), LifecycleError<D::Error>> {
        let ctx = ctx.ok_or(LifecycleError::Null)?;
        if ctx.state != LifecycleState::Ready {
            return Err(LifecycleError::InvalidState);
        }
        let sensor = match ctx.sensor.as_mut() {
            Some(sensor) if sensor.configurable() => sensor,
            _ => return Err(LifecycleError::InvalidState),
        };

        let mut actual = ctx.configuration;
        sensor
            .configuration_get(&mut actual)
            .map_err(LifecycleError::Backend)?;
        ctx.configuration = actual;
        Ok(())
    }

    /// Persist the context's configuration under its NVM key
    ///
    /// Does not wait for the storage: a busy subsystem is reported and the
    /// caller decides when to retry.
    ///
    /// # Errors
    /// - [`LifecycleError::Null`] if the context is absent
    /// - [`LifecycleError::Busy`] if the storage is busy; nothing is written
    /// - [`LifecycleError::Codec`] if the configuration cannot be encoded
    /// - [`LifecycleError::Backend`] with the storage status
    pub fn store<D: SensorDriver, N: NvmStorage>(
        &mut self,
        ctx: Option<&SensorContext<D>>,
        nvm: &mut N,
    ) -> Result<(), LifecycleError<N::Error>> {
        let ctx = ctx.ok_or(LifecycleError::Null)?;
        if nvm.is_busy() {
            return Err(LifecycleError::Busy);
        }

        let blob = ctx.configuration.to_bytes()?;
        if self.config.dump_blobs {
            self.sink.log_hex(Level::Debug, &blob);
        }

        nvm.store(ctx.nvm_key(), &blob)
            .map_err(LifecycleError::Backend)
    }

    /// Restore the context's configuration from its NVM key
    ///
    /// The restored values are not applied to the hardware; call
    /// [`Lifecycle::configure`] afterwards for that.
    ///
    /// # Errors
    /// - [`LifecycleError::Null`] if the context is absent
    /// - [`LifecycleError::Busy`] if the storage is busy; nothing is read
    /// - [`LifecycleError::Backend`] with the storage status
    /// - [`LifecycleError::Codec`] if the stored record is not a valid
    ///   configuration
    ///
    /// On any error the context's configuration is unchanged.
    pub fn load<D: SensorDriver, N: NvmStorage>(
        &mut self,
        ctx: Option<&mut SensorContext<D>>,
        nvm: &mut N,
    ) -> Result<(), LifecycleError<N::Error>> {
        let ctx = ctx.ok_or(LifecycleError::Null)?;
        if nvm.is_busy() {
            return Err(LifecycleError::Busy);
        }

        let mut blob = [0u8; SensorConfiguration::SIZE];
        let len = nvm
            .load(ctx.nvm_key(), &mut blob)
            .map_err(LifecycleError::Backend)?;
        let blob = blob.get(..len).ok_or(CodecError::Length)?;
        if self.config.dump_blobs {
            self.sink.log_hex(Level::Debug, blob);
        }

        ctx.configuration = SensorConfiguration::from_bytes(blob)?;
        Ok(())
    }

    /// Release the context's NVM record
    ///
    /// The space is reclaimed by the storage's next garbage collection.
    ///
    /// # Errors
    /// Same as [`Lifecycle::store`], without the codec case.
    pub fn erase<D: SensorDriver, N: NvmStorage>(
        &mut self,
        ctx: Option<&SensorContext<D>>,
        nvm: &mut N,
    ) -> Result<(), LifecycleError<N::Error>> {
        let ctx = ctx.ok_or(LifecycleError::Null)?;
        if nvm.is_busy() {
            return Err(LifecycleError::Busy);
        }

        nvm.free(ctx.nvm_key()).map_err(LifecycleError::Backend)
    }
}
