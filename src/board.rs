//! Board glue: concrete collaborators behind the menu's traits.

use crate::ui::ChannelQueue;
use embassy_nrf::gpio::Output;
use embassy_nrf::peripherals::SPI3;
use embassy_nrf::spim::Spim;
use embassy_nrf::temp::Temp;
use embassy_time::{Delay, Instant};
use embedded_hal_bus::spi::{ExclusiveDevice, NoDelay};
use flowmeter_ui::calendar::{DateTime, SoftClock};
use flowmeter_ui::lcd::pcf8553::Pcf8553Bus;
use flowmeter_ui::params::{FactoryStore, TemperatureSensor};
use flowmeter_ui::Env;

/// PCF8553 on SPIM3, CE as the chip select, plus the RST line.
pub type LcdBus = Pcf8553Bus<ExclusiveDevice<Spim<'static, SPI3>, Output<'static>, NoDelay>, Output<'static>, Delay>;

/// Date shown until the user sets the clock.
const CLOCK_START: DateTime = DateTime::new(17, 4, 23, 17, 4, 20);

/// Last die temperature sample. The menu reads synchronously, so the
/// runner refreshes this before each dispatch.
struct CachedTemperature {
    celsius: i32,
}

impl TemperatureSensor for CachedTemperature {
    fn read_celsius(&mut self) -> i32 {
        self.celsius
    }
}

pub struct Board {
    sensor: Temp<'static>,
    temperature: CachedTemperature,
    clock: SoftClock,
    /// Instant the clock was last advanced to, in whole seconds.
    clock_mark: Instant,
    params: FactoryStore,
    queue: ChannelQueue,
}

impl Board {
    pub fn new(sensor: Temp<'static>) -> Self {
        Self {
            sensor,
            temperature: CachedTemperature { celsius: 0 },
            clock: SoftClock::new(CLOCK_START),
            clock_mark: Instant::now(),
            params: FactoryStore::new(),
            queue: ChannelQueue::new(),
        }
    }

    /// Bring the clock and the temperature up to date.
    pub async fn sample(&mut self) {
        let seconds = self.clock_mark.elapsed().as_secs();
        if seconds > 0 {
            self.clock.advance(seconds as u32);
            self.clock_mark += embassy_time::Duration::from_secs(seconds);
        }
        self.temperature.celsius = self.sensor.read().await.to_num::<i32>();
    }

    pub fn env(&mut self) -> Env<'_> {
        Env {
            calendar: &mut self.clock,
            temperature: &mut self.temperature,
            params: &mut self.params,
            queue: &mut self.queue,
        }
    }
}
