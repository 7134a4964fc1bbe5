//! Non-blocking acquisition state machine
//!
//! Drives one measurement cycle over a [`QueuedMagBus`] across repeated
//! polls:
//!
//! ```text
//! CheckStatus -> WaitingForStatus -> WaitingForData -> CheckStatus
//!      ^               |
//!      +---------------+  (status nack or not ready, one inline retry)
//! ```
//!
//! Each poll either arms a read, returns early because the armed read has not
//! settled yet, or collects a settled read and moves on. The only blocking
//! wait is inside [`QueuedRead::complete`] and is bounded by one settle
//! interval.

use super::bus::QueuedMagBus;
use super::gain::{decode_raw, CalibrationGain};
use super::queued_read::QueuedRead;
use super::registers::{
    Status1, Status2, CNTL1, HXL, MEASUREMENT_LEN, MODE_SINGLE_MEASURE, ST1,
};
use crate::devices::traits::{CompassError, MagSample};
use crate::platform::TimerInterface;

/// Acquisition phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AcquisitionState {
    /// Next poll arms a status read
    #[default]
    CheckStatus,
    /// Status read armed
    WaitingForStatus,
    /// Measurement read armed
    WaitingForData,
}

/// Validate a `HXL..HZH, ST2` block and convert it to a calibrated sample
pub fn decode_measurement(
    buf: &[u8; MEASUREMENT_LEN],
    gain: &CalibrationGain,
) -> Result<MagSample, CompassError> {
    if Status2::from_bits_retain(buf[6]).is_fault() {
        return Err(CompassError::SensorFault);
    }
    let mut data = [0u8; 6];
    data.copy_from_slice(&buf[..6]);
    Ok(gain.apply(decode_raw(&data)))
}

/// Measurement cycle over a queued transport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Acquisition {
    state: AcquisitionState,
    read: QueuedRead,
}

impl Acquisition {
    /// Idle cycle; `settle_us` is the wait between arming and collecting a read
    pub const fn new(settle_us: u32) -> Self {
        Self {
            state: AcquisitionState::CheckStatus,
            read: QueuedRead::new(settle_us),
        }
    }

    /// Current phase
    pub fn state(&self) -> AcquisitionState {
        self.state
    }

    /// Outstanding read tracker
    pub fn queued_read(&self) -> &QueuedRead {
        &self.read
    }

    /// Abandon any armed read and start over
    pub fn reset(&mut self) {
        self.read.clear();
        self.state = AcquisitionState::CheckStatus;
    }

    /// Advance the cycle by one step
    ///
    /// Returns a sample only when a settled measurement passed validation.
    /// `DataNotReady` is the ordinary "nothing yet" outcome.
    pub fn poll<B, T>(
        &mut self,
        bus: &mut B,
        timer: &mut T,
        gain: &CalibrationGain,
    ) -> Result<MagSample, CompassError>
    where
        B: QueuedMagBus,
        T: TimerInterface,
    {
        match self.state {
            AcquisitionState::CheckStatus => {
                self.check_status(bus, timer)?;
                Err(CompassError::DataNotReady)
            }
            AcquisitionState::WaitingForStatus => self.wait_for_status(bus, timer),
            AcquisitionState::WaitingForData => self.wait_for_data(bus, timer, gain),
        }
    }

    fn check_status<B, T>(&mut self, bus: &mut B, timer: &T) -> Result<(), CompassError>
    where
        B: QueuedMagBus,
        T: TimerInterface,
    {
        self.read.start(bus, timer, ST1, 1)?;
        self.state = AcquisitionState::WaitingForStatus;
        Ok(())
    }

    fn wait_for_status<B, T>(&mut self, bus: &mut B, timer: &mut T) -> Result<MagSample, CompassError>
    where
        B: QueuedMagBus,
        T: TimerInterface,
    {
        if self.read.time_remaining_us(timer) > 0 {
            return Err(CompassError::DataNotReady);
        }

        let mut status = [0u8; 1];
        let outcome = self.read.complete(bus, timer, &mut status).and_then(|_| {
            if Status1::from_bits_retain(status[0]).contains(Status1::DATA_READY) {
                Ok(())
            } else {
                Err(CompassError::DataNotReady)
            }
        });

        if let Err(e) = outcome {
            // Queue the status read again right away, once
            self.state = AcquisitionState::CheckStatus;
            if let Err(retry) = self.check_status(bus, timer) {
                crate::log_debug!("AK8963 status re-queue failed: {}", retry);
            }
            return Err(e);
        }

        match self.read.start(bus, timer, HXL, MEASUREMENT_LEN as u8) {
            Ok(()) => {
                self.state = AcquisitionState::WaitingForData;
                Err(CompassError::DataNotReady)
            }
            Err(e) => {
                crate::log_debug!("AK8963 data read not armed: {}", e);
                self.state = AcquisitionState::CheckStatus;
                Err(e)
            }
        }
    }

    fn wait_for_data<B, T>(
        &mut self,
        bus: &mut B,
        timer: &mut T,
        gain: &CalibrationGain,
    ) -> Result<MagSample, CompassError>
    where
        B: QueuedMagBus,
        T: TimerInterface,
    {
        if self.read.time_remaining_us(timer) > 0 {
            return Err(CompassError::DataNotReady);
        }

        let mut buf = [0u8; MEASUREMENT_LEN];
        let fetched = self.read.complete(bus, timer, &mut buf);
        self.state = AcquisitionState::CheckStatus;

        // Start the next conversion whatever became of this one
        let rearmed = bus.write_register(CNTL1, MODE_SINGLE_MEASURE);

        let sample = fetched.and_then(|_| decode_measurement(&buf, gain));
        match (&sample, rearmed) {
            (Ok(_), Err(e)) => {
                crate::log_warn!("AK8963 re-arm failed after valid sample: {}", e);
            }
            (Err(e), rearmed) => {
                crate::log_debug!("AK8963 sample discarded: {}", e);
                if let Err(re) = rearmed {
                    crate::log_warn!("AK8963 re-arm failed: {}", re);
                }
            }
            (Ok(_), Ok(())) => {}
        }
        sample
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::devices::compass::ak8963::bus::Mpu9250Passthrough;
    use crate::devices::compass::ak8963::config::PassthroughConfig;
    use crate::platform::mock::{MockSpi, MockTimer, SpiTransaction};
    use embassy_sync::blocking_mutex::raw::NoopRawMutex;

    type Bus = Mpu9250Passthrough<MockSpi, MockTimer, NoopRawMutex>;

    const REARM: [[u8; 2]; 4] = [[0x25, 0x0C], [0x26, 0x0A], [0x63, 0x01], [0x27, 0x81]];

    fn setup() -> (Acquisition, Bus, MockSpi, MockTimer) {
        let spi = MockSpi::new();
        let timer = MockTimer::new();
        let bus = Mpu9250Passthrough::with_config(
            spi.clone(),
            timer.clone(),
            PassthroughConfig::default(),
        );
        (Acquisition::new(8_000), bus, spi, timer)
    }

    fn rearm_count(spi: &MockSpi) -> usize {
        let writes = spi.writes();
        writes
            .windows(REARM.len())
            .filter(|w| w.iter().zip(REARM.iter()).all(|(a, b)| a.as_slice() == b))
            .count()
    }

    /// Run the cycle up to `WaitingForData`, with DRDY set
    fn arm_data(acq: &mut Acquisition, bus: &mut Bus, spi: &MockSpi, timer: &mut MockTimer) {
        let gain = CalibrationGain::default();
        assert_eq!(
            acq.poll(bus, timer, &gain),
            Err(CompassError::DataNotReady)
        );
        timer.advance(8_000);
        spi.push_read_data(&[0x01]);
        assert_eq!(
            acq.poll(bus, timer, &gain),
            Err(CompassError::DataNotReady)
        );
        assert_eq!(acq.state(), AcquisitionState::WaitingForData);
        timer.advance(8_000);
    }

    #[test]
    fn test_decode_measurement() {
        let gain = CalibrationGain::from_factors([30.0; 3]);
        let buf = [0x10, 0x00, 0x20, 0x00, 0x30, 0x00, 0x00];
        assert_eq!(
            decode_measurement(&buf, &gain),
            Ok(MagSample {
                x: -480,
                y: -960,
                z: -1440
            })
        );
    }

    #[test]
    fn test_decode_measurement_rejects_fault_bits() {
        let gain = CalibrationGain::default();
        for st2 in [0x01, 0x02, 0x03, 0x12] {
            let buf = [0, 0, 0, 0, 0, 0, st2];
            assert_eq!(
                decode_measurement(&buf, &gain),
                Err(CompassError::SensorFault)
            );
        }
    }

    #[test]
    fn test_check_status_arms_status_read() {
        let (mut acq, mut bus, spi, mut timer) = setup();

        let result = acq.poll(&mut bus, &mut timer, &CalibrationGain::default());

        assert_eq!(result, Err(CompassError::DataNotReady));
        assert_eq!(acq.state(), AcquisitionState::WaitingForStatus);
        assert_eq!(
            spi.writes(),
            vec![vec![0x25, 0x8C], vec![0x26, 0x02], vec![0x27, 0x81]]
        );
    }

    #[test]
    fn test_waiting_returns_early_without_traffic() {
        let (mut acq, mut bus, spi, mut timer) = setup();
        let gain = CalibrationGain::default();
        acq.poll(&mut bus, &mut timer, &gain).unwrap_err();
        spi.clear_transactions();
        timer.advance(4_000);

        assert_eq!(
            acq.poll(&mut bus, &mut timer, &gain),
            Err(CompassError::DataNotReady)
        );
        assert_eq!(acq.state(), AcquisitionState::WaitingForStatus);
        assert!(spi.transactions().is_empty());
    }

    #[test]
    fn test_status_not_ready_requeues_once() {
        let (mut acq, mut bus, spi, mut timer) = setup();
        let gain = CalibrationGain::default();
        acq.poll(&mut bus, &mut timer, &gain).unwrap_err();
        timer.advance(8_000);
        spi.clear_transactions();
        spi.push_read_data(&[0x00]);

        assert_eq!(
            acq.poll(&mut bus, &mut timer, &gain),
            Err(CompassError::DataNotReady)
        );

        assert_eq!(acq.state(), AcquisitionState::WaitingForStatus);
        assert!(acq.queued_read().is_pending());
        assert_eq!(
            spi.transactions(),
            vec![
                SpiTransaction::WriteRead {
                    write_data: vec![0xC9],
                    read_len: 1
                },
                SpiTransaction::Write {
                    data: vec![0x25, 0x8C]
                },
                SpiTransaction::Write {
                    data: vec![0x26, 0x02]
                },
                SpiTransaction::Write {
                    data: vec![0x27, 0x81]
                },
            ]
        );
        assert_eq!(rearm_count(&spi), 0);
    }

    #[test]
    fn test_status_nack_requeues_once() {
        let (mut acq, mut bus, spi, mut timer) = setup();
        let gain = CalibrationGain::default();
        acq.poll(&mut bus, &mut timer, &gain).unwrap_err();
        timer.advance(8_000);
        spi.set_fail_reads(true);

        assert!(matches!(
            acq.poll(&mut bus, &mut timer, &gain),
            Err(CompassError::TransportNack(_))
        ));
        assert_eq!(acq.state(), AcquisitionState::WaitingForStatus);
        assert_eq!(rearm_count(&spi), 0);
    }

    #[test]
    fn test_status_ready_arms_data_read() {
        let (mut acq, mut bus, spi, mut timer) = setup();
        let gain = CalibrationGain::default();
        acq.poll(&mut bus, &mut timer, &gain).unwrap_err();
        timer.advance(8_000);
        spi.clear_transactions();
        spi.push_read_data(&[0x01]);

        assert_eq!(
            acq.poll(&mut bus, &mut timer, &gain),
            Err(CompassError::DataNotReady)
        );
        assert_eq!(acq.state(), AcquisitionState::WaitingForData);
        assert_eq!(acq.queued_read().requested_len(), 7);
        assert_eq!(
            spi.writes(),
            vec![vec![0x25, 0x8C], vec![0x26, 0x03], vec![0x27, 0x87]]
        );
    }

    #[test]
    fn test_full_cycle_yields_sample() {
        let (mut acq, mut bus, spi, mut timer) = setup();
        arm_data(&mut acq, &mut bus, &spi, &mut timer);
        spi.clear_transactions();
        spi.push_read_data(&[0x10, 0x00, 0x20, 0x00, 0x30, 0x00, 0x00]);

        let gain = CalibrationGain::from_factors([30.0; 3]);
        let sample = acq.poll(&mut bus, &mut timer, &gain);

        assert_eq!(
            sample,
            Ok(MagSample {
                x: -480,
                y: -960,
                z: -1440
            })
        );
        assert_eq!(acq.state(), AcquisitionState::CheckStatus);
        assert!(!acq.queued_read().is_pending());
        assert_eq!(rearm_count(&spi), 1);
    }

    #[test]
    fn test_sensor_fault_rearms_once() {
        let (mut acq, mut bus, spi, mut timer) = setup();
        arm_data(&mut acq, &mut bus, &spi, &mut timer);
        spi.clear_transactions();
        spi.push_read_data(&[0x10, 0x00, 0x20, 0x00, 0x30, 0x00, 0x02]);

        assert_eq!(
            acq.poll(&mut bus, &mut timer, &CalibrationGain::default()),
            Err(CompassError::SensorFault)
        );
        assert_eq!(acq.state(), AcquisitionState::CheckStatus);
        assert_eq!(rearm_count(&spi), 1);
    }

    #[test]
    fn test_data_nack_rearms_once() {
        let (mut acq, mut bus, spi, mut timer) = setup();
        arm_data(&mut acq, &mut bus, &spi, &mut timer);
        spi.clear_transactions();
        spi.set_fail_reads(true);

        assert!(matches!(
            acq.poll(&mut bus, &mut timer, &CalibrationGain::default()),
            Err(CompassError::TransportNack(_))
        ));
        assert_eq!(acq.state(), AcquisitionState::CheckStatus);
        assert_eq!(rearm_count(&spi), 1);
    }

    #[test]
    fn test_rearm_failure_keeps_valid_sample() {
        let (mut acq, mut bus, spi, mut timer) = setup();
        arm_data(&mut acq, &mut bus, &spi, &mut timer);
        spi.push_read_data(&[0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]);
        spi.set_fail_writes(true);

        let sample = acq.poll(&mut bus, &mut timer, &CalibrationGain::default());
        assert_eq!(sample, Ok(MagSample { x: -1, y: 0, z: 0 }));
        assert_eq!(acq.state(), AcquisitionState::CheckStatus);
    }

    #[test]
    fn test_check_status_arm_failure_stays_in_check_status() {
        let (mut acq, mut bus, spi, mut timer) = setup();
        spi.set_fail_writes(true);

        assert!(matches!(
            acq.poll(&mut bus, &mut timer, &CalibrationGain::default()),
            Err(CompassError::TransportNack(_))
        ));
        assert_eq!(acq.state(), AcquisitionState::CheckStatus);
        assert!(!acq.queued_read().is_pending());
    }

    #[test]
    fn test_data_completion_blocks_at_most_remaining_time() {
        let (mut acq, mut bus, spi, mut timer) = setup();
        let gain = CalibrationGain::default();
        acq.poll(&mut bus, &mut timer, &gain).unwrap_err();
        timer.advance(8_000);
        spi.push_read_data(&[0x01]);
        acq.poll(&mut bus, &mut timer, &gain).unwrap_err();
        timer.advance(8_000);
        timer.clear_delays();

        acq.poll(&mut bus, &mut timer, &gain).unwrap();

        // Only the re-arm write settles remain
        let delays: Vec<u32> = timer.delays();
        assert!(delays.iter().all(|d| *d == 10));
    }

    #[test]
    fn test_reset_clears_pending_read() {
        let (mut acq, mut bus, _spi, mut timer) = setup();
        acq.poll(&mut bus, &mut timer, &CalibrationGain::default())
            .unwrap_err();
        assert!(acq.queued_read().is_pending());

        acq.reset();

        assert_eq!(acq.state(), AcquisitionState::CheckStatus);
        assert!(!acq.queued_read().is_pending());
    }
}
