//! Clock types.
//!
//! There are two clocks: the [`Working`] clock that reads the system time and
//! the [`Stopped`] clock that always returns a fixed time, so tests can make
//! time-dependent assertions deterministically.
use std::marker::PhantomData;
use std::time::Duration;

use roomtracker_primitives::DurationSinceUnixEpoch;

/// A generic structure that represents a clock.
///
/// It can be either the working clock (production) or the stopped clock
/// (testing). It implements the [`Time`] trait, which gives you the current
/// time.
#[derive(Debug)]
pub struct Clock<T> {
    clock: PhantomData<T>,
}

/// The working clock. It returns the current time.
pub type Working = Clock<working::WorkingClock>;

/// The stopped clock. It returns always the same fixed time.
pub type Stopped = Clock<stopped::StoppedClock>;

/// Trait for types that can be used as a timestamp clock.
pub trait Time: Sized {
    fn now() -> DurationSinceUnixEpoch;

    fn dur_since(past_timestamp: &DurationSinceUnixEpoch) -> Option<Duration> {
        Self::now().checked_sub(*past_timestamp)
    }

    fn now_add(add_time: &Duration) -> Option<DurationSinceUnixEpoch> {
        Self::now().checked_add(*add_time)
    }

    fn now_sub(sub_time: &Duration) -> Option<DurationSinceUnixEpoch> {
        Self::now().checked_sub(*sub_time)
    }
}

pub mod working {
    //! The working clock, for production.
    use std::time::SystemTime;

    use roomtracker_primitives::DurationSinceUnixEpoch;

    use super::{Time, Working};

    #[derive(Debug)]
    pub struct WorkingClock;

    impl Time for Working {
        fn now() -> DurationSinceUnixEpoch {
            SystemTime::now()
                .duration_since(SystemTime::UNIX_EPOCH)
                .expect("the system time should be after the Unix Epoch")
        }
    }
}

pub mod stopped {
    //! The stopped clock, for testing.
    //!
    //! The time is fixed per thread, starting at the Unix Epoch, and can be
    //! moved with the [`Stopped`] trait helpers.
    use std::time::Duration;

    use roomtracker_primitives::DurationSinceUnixEpoch;

    use super::{Stopped as StoppedClockType, Time};

    #[derive(Debug)]
    pub struct StoppedClock;

    impl Time for StoppedClockType {
        fn now() -> DurationSinceUnixEpoch {
            detail::get_fixed_time()
        }
    }

    /// Trait to control the time of the stopped clock.
    pub trait Stopped: Time {
        /// Sets the clock to a custom time.
        fn local_set(unix_time: &DurationSinceUnixEpoch);

        /// Sets the clock to the Unix Epoch.
        fn local_set_to_unix_epoch() {
            Self::local_set(&DurationSinceUnixEpoch::ZERO);
        }

        /// Moves the clock forwards.
        ///
        /// # Errors
        ///
        /// Returns an error if the addition overflows.
        fn local_add(duration: &Duration) -> Result<(), IntErrorKind>;

        /// Moves the clock backwards.
        ///
        /// # Errors
        ///
        /// Returns an error if the subtraction underflows.
        fn local_sub(duration: &Duration) -> Result<(), IntErrorKind>;

        /// Resets the clock to the Unix Epoch.
        fn local_reset();
    }

    use std::num::IntErrorKind;

    impl Stopped for StoppedClockType {
        fn local_set(unix_time: &DurationSinceUnixEpoch) {
            detail::set_fixed_time(unix_time);
        }

        fn local_add(duration: &Duration) -> Result<(), IntErrorKind> {
            let time = Self::now().checked_add(*duration).ok_or(IntErrorKind::PosOverflow)?;
            detail::set_fixed_time(&time);
            Ok(())
        }

        fn local_sub(duration: &Duration) -> Result<(), IntErrorKind> {
            let time = Self::now().checked_sub(*duration).ok_or(IntErrorKind::NegOverflow)?;
            detail::set_fixed_time(&time);
            Ok(())
        }

        fn local_reset() {
            detail::set_fixed_time(&DurationSinceUnixEpoch::ZERO);
        }
    }

    mod detail {
        use std::cell::RefCell;

        use roomtracker_primitives::DurationSinceUnixEpoch;

        thread_local! {
            static FIXED_TIME: RefCell<DurationSinceUnixEpoch> = const { RefCell::new(DurationSinceUnixEpoch::ZERO) };
        }

        pub fn get_fixed_time() -> DurationSinceUnixEpoch {
            FIXED_TIME.with(|time| *time.borrow())
        }

        pub fn set_fixed_time(unix_time: &DurationSinceUnixEpoch) {
            FIXED_TIME.with(|time| *time.borrow_mut() = *unix_time);
        }
    }

}
