//! Bus peripheral status abstractions

/// Enable state of the bus peripherals that share board pins.
///
/// The wiring layer reads these before every pin operation and refuses to
/// touch a pin owned by an enabled bus. The queries are lock-free by
/// design: bus bring-up and GPIO use are expected to happen from the same
/// execution context.
pub trait BusStatus {
    /// SPI peripheral is enabled (owns SCK/MOSI/MISO).
    fn spi_enabled(&self) -> bool;

    /// I²C peripheral is enabled (owns SCL/SDA).
    fn i2c_enabled(&self) -> bool;

    /// UART1 peripheral is enabled (owns RX/TX).
    fn serial1_enabled(&self) -> bool;
}
