//! AK8963 Driver Implementation
//!
//! Detection, initialization and sample acquisition over either transport.

use super::acquisition::{decode_measurement, Acquisition, AcquisitionState};
use super::bus::{DirectI2c, MagBus, Mpu9250Passthrough, QueuedMagBus};
use super::config::Ak8963Config;
use super::gain::CalibrationGain;
use super::registers::{self, Status1};
use crate::devices::traits::{CompassError, CompassSensor, MagSample};
use crate::platform::{I2cInterface, SpiInterface, TimerInterface};
use embassy_sync::blocking_mutex::raw::RawMutex;

/// AK8963 3-axis magnetometer driver
///
/// `B` is the transport, `T` the time source used for settle delays and
/// read timestamps.
pub struct Ak8963<B, T> {
    /// Magnetometer transport
    bus: B,

    /// Time source
    timer: T,

    /// Driver configuration
    config: Ak8963Config,

    /// Per-axis gain, unity until `init()` reads the trim bytes
    gain: CalibrationGain,

    /// Queued acquisition cycle (pass-through transport only)
    acquisition: Acquisition,
}

impl<B: MagBus, T: TimerInterface> Ak8963<B, T> {
    /// Bind a transport without probing the device
    pub fn new(bus: B, timer: T, config: Ak8963Config) -> Self {
        Self {
            bus,
            timer,
            config,
            gain: CalibrationGain::default(),
            acquisition: Acquisition::new(config.settle_delay_us),
        }
    }

    /// Probe for an AK8963 on `bus`
    ///
    /// Brings the transport up, soft-resets the magnetometer and checks its
    /// device ID.
    pub fn detect(mut bus: B, mut timer: T, config: Ak8963Config) -> Result<Self, CompassError> {
        bus.prepare()?;

        bus.write_register(registers::CNTL2, registers::CNTL2_SRST)?;
        timer.delay_ms(config.reset_delay_ms)?;

        let mut wia = [0u8; 1];
        bus.read_registers(registers::WIA, &mut wia)?;
        if wia[0] != registers::WHO_AM_I_VALUE {
            crate::log_warn!(
                "Unknown compass WIA: {:#x} (expected {:#x})",
                wia[0],
                registers::WHO_AM_I_VALUE
            );
            return Err(CompassError::NotDetected { who_am_i: wia[0] });
        }

        crate::log_info!("AK8963 detected (WIA: {:#x})", wia[0]);
        Ok(Self::new(bus, timer, config))
    }

    /// Read the factory trim, clear stale status and trigger the first
    /// measurement
    ///
    /// Every step is attempted even if an earlier one failed; failures are
    /// logged and `Ok` is returned. With `strict_init` set the first failure
    /// is returned instead.
    pub fn init(&mut self) -> Result<(), CompassError> {
        // Blocking reads below reprogram slave 0, so any armed read is stale
        self.acquisition.reset();

        // Step 1: Power down before switching mode
        let result = self
            .bus
            .write_register(registers::CNTL1, registers::MODE_POWER_DOWN);
        self.init_step("power down", result)?;

        // Step 2: Fuse ROM access and trim read
        let result = self
            .bus
            .write_register(registers::CNTL1, registers::MODE_FUSE_ROM);
        self.init_step("fuse ROM mode", result)?;

        let mut trim = [0u8; 3];
        let result = self.bus.read_registers(registers::ASAX, &mut trim);
        if result.is_ok() {
            self.gain = CalibrationGain::from_trim(trim);
            crate::log_debug!("AK8963 trim: {:?}", trim);
        }
        self.init_step("trim read", result)?;

        // Step 3: Power down again
        let result = self
            .bus
            .write_register(registers::CNTL1, registers::MODE_POWER_DOWN);
        self.init_step("power down", result)?;

        // Step 4: Clear status registers
        let mut status = [0u8; 1];
        let result = self.bus.read_registers(registers::ST1, &mut status);
        self.init_step("ST1 clear", result)?;
        let result = self.bus.read_registers(registers::ST2, &mut status);
        self.init_step("ST2 clear", result)?;

        // Step 5: Trigger first measurement
        let result = self
            .bus
            .write_register(registers::CNTL1, registers::MODE_SINGLE_MEASURE);
        self.init_step("single measurement", result)?;

        crate::log_info!("AK8963 initialized");
        Ok(())
    }

    fn init_step(
        &self,
        step: &'static str,
        result: crate::platform::Result<()>,
    ) -> Result<(), CompassError> {
        match result {
            Ok(()) => Ok(()),
            Err(e) => {
                crate::log_warn!("AK8963 init: {} failed: {}", step, e);
                if self.config.strict_init {
                    Err(e.into())
                } else {
                    Ok(())
                }
            }
        }
    }

    /// Blocking read: check DRDY, then fetch and decode one measurement
    ///
    /// The next measurement is triggered only when this one was ready.
    pub fn read_blocking(&mut self) -> Result<MagSample, CompassError> {
        let mut status = [0u8; 1];
        self.bus.read_registers(registers::ST1, &mut status)?;
        if !Status1::from_bits_retain(status[0]).contains(Status1::DATA_READY) {
            return Err(CompassError::DataNotReady);
        }

        let mut buf = [0u8; registers::MEASUREMENT_LEN];
        let fetched = self.bus.read_registers(registers::HXL, &mut buf);

        if let Err(e) = self
            .bus
            .write_register(registers::CNTL1, registers::MODE_SINGLE_MEASURE)
        {
            crate::log_warn!("AK8963 re-arm failed: {}", e);
        }

        fetched?;
        decode_measurement(&buf, &self.gain)
    }

    /// Current calibration gain
    pub fn calibration(&self) -> &CalibrationGain {
        &self.gain
    }

    /// Replace the calibration gain
    ///
    /// `init()` overwrites it with the factory trim.
    pub fn with_calibration(mut self, gain: CalibrationGain) -> Self {
        self.gain = gain;
        self
    }

    /// Driver configuration
    pub fn config(&self) -> &Ak8963Config {
        &self.config
    }

    /// Current acquisition phase
    pub fn state(&self) -> AcquisitionState {
        self.acquisition.state()
    }

    /// Release the transport and time source
    pub fn release(self) -> (B, T) {
        (self.bus, self.timer)
    }
}

impl<B: QueuedMagBus, T: TimerInterface> Ak8963<B, T> {
    /// Non-blocking read: advance the acquisition cycle by one step
    pub fn poll(&mut self) -> Result<MagSample, CompassError> {
        self.acquisition
            .poll(&mut self.bus, &mut self.timer, &self.gain)
    }
}

impl<I: I2cInterface, T: TimerInterface> CompassSensor for Ak8963<DirectI2c<I>, T> {
    fn init(&mut self) -> Result<(), CompassError> {
        Ak8963::init(self)
    }

    fn read(&mut self) -> Option<MagSample> {
        self.read_blocking().ok()
    }

    fn gain(&self) -> [f32; 3] {
        self.gain.factors()
    }
}

impl<S, PT, M, T> CompassSensor for Ak8963<Mpu9250Passthrough<S, PT, M>, T>
where
    S: SpiInterface,
    PT: TimerInterface,
    M: RawMutex,
    T: TimerInterface,
{
    fn init(&mut self) -> Result<(), CompassError> {
        Ak8963::init(self)
    }

    fn read(&mut self) -> Option<MagSample> {
        self.poll().ok()
    }

    fn gain(&self) -> [f32; 3] {
        self.gain.factors()
    }
}
