/*
 *  display/drivers/port.rs
 *
 *  monogfx - page-addressed monochrome graphics
 *  (c) 2020-26 Stuart Hunter
 *
 *  Command ports - the byte level bus a controller driver writes to
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *  Public License.
 *
 */

use display_interface::{DataFormat, WriteOnlyDataCommand};
use embedded_hal::i2c::{Error as _, I2c, Operation};

use crate::display::error::DisplayError;

/// I2C control byte announcing command bytes
const CONTROL_COMMAND: u8 = 0x00;
/// I2C control byte announcing display RAM data
const CONTROL_DATA: u8 = 0x40;

/// Byte level access to a display controller
///
/// Commands configure the controller; data goes to display RAM at the
/// current address window. Empty writes are no-ops.
pub trait CommandPort {
    /// Send one command with its argument bytes
    fn write_command(&mut self, bytes: &[u8]) -> Result<(), DisplayError>;

    /// Send a block of display RAM data
    fn write_data(&mut self, bytes: &[u8]) -> Result<(), DisplayError>;
}

/// Whether a 7-bit address is reserved by the I2C specification
pub fn is_reserved_i2c_address(address: u8) -> bool {
    (address & 0x78) == 0 || (address & 0x78) == 0x78
}

/// Command port over any embedded-hal I2C bus
///
/// Each write is one transaction: the control byte followed by the payload,
/// with no repeated start in between.
pub struct I2cPort<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C: I2c> I2cPort<I2C> {
    /// Wrap a bus; `address` must be a non-reserved 7-bit address
    pub fn new(i2c: I2C, address: u8) -> Result<Self, DisplayError> {
        if address >= 0x80 {
            return Err(DisplayError::InvalidConfiguration(format!(
                "I2C address 0x{:02X} is not a 7-bit address",
                address
            )));
        }
        if is_reserved_i2c_address(address) {
            return Err(DisplayError::InvalidConfiguration(format!(
                "I2C address 0x{:02X} is reserved",
                address
            )));
        }
        Ok(Self { i2c, address })
    }

    pub fn address(&self) -> u8 {
        self.address
    }

    pub fn release(self) -> I2C {
        self.i2c
    }

    fn write_with_control(&mut self, control: u8, bytes: &[u8]) -> Result<(), DisplayError> {
        if bytes.is_empty() {
            return Ok(());
        }
        let control = [control];
        let mut operations = [Operation::Write(&control), Operation::Write(bytes)];
        self.i2c
            .transaction(self.address, &mut operations)
            .map_err(|e| {
                DisplayError::I2cError(format!(
                    "write to 0x{:02X} failed: {:?}",
                    self.address,
                    e.kind()
                ))
            })
    }
}

impl<I2C: I2c> CommandPort for I2cPort<I2C> {
    fn write_command(&mut self, bytes: &[u8]) -> Result<(), DisplayError> {
        self.write_with_control(CONTROL_COMMAND, bytes)
    }

    fn write_data(&mut self, bytes: &[u8]) -> Result<(), DisplayError> {
        self.write_with_control(CONTROL_DATA, bytes)
    }
}

/// Command port over a display-interface bus (SPI, I2C or parallel)
pub struct InterfacePort<DI> {
    interface: DI,
}

impl<DI: WriteOnlyDataCommand> InterfacePort<DI> {
    pub fn new(interface: DI) -> Self {
        Self { interface }
    }

    pub fn release(self) -> DI {
        self.interface
    }
}

impl<DI: WriteOnlyDataCommand> CommandPort for InterfacePort<DI> {
    fn write_command(&mut self, bytes: &[u8]) -> Result<(), DisplayError> {
        if bytes.is_empty() {
            return Ok(());
        }
        self.interface.send_commands(DataFormat::U8(bytes))?;
        Ok(())
    }

    fn write_data(&mut self, bytes: &[u8]) -> Result<(), DisplayError> {
        if bytes.is_empty() {
            return Ok(());
        }
        self.interface.send_data(DataFormat::U8(bytes))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::i2c::{ErrorKind, ErrorType, NoAcknowledgeSource, SevenBitAddress};

    /// Records each transaction as (address, concatenated bytes)
    #[derive(Default)]
    struct RecordingBus {
        transactions: Vec<(u8, Vec<u8>)>,
        nack: bool,
    }

    impl ErrorType for RecordingBus {
        type Error = ErrorKind;
    }

    impl I2c<SevenBitAddress> for RecordingBus {
        fn transaction(
            &mut self,
            address: u8,
            operations: &mut [Operation<'_>],
        ) -> Result<(), Self::Error> {
            if self.nack {
                return Err(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address));
            }
            let mut bytes = Vec::new();
            for op in operations.iter() {
                if let Operation::Write(chunk) = op {
                    bytes.extend_from_slice(chunk);
                }
            }
            self.transactions.push((address, bytes));
            Ok(())
        }
    }

    /// Records whether each send was a command or data
    #[derive(Default)]
    struct RecordingInterface {
        sent: Vec<(bool, Vec<u8>)>,
    }

    impl WriteOnlyDataCommand for RecordingInterface {
        fn send_commands(&mut self, cmd: DataFormat<'_>) -> Result<(), display_interface::DisplayError> {
            match cmd {
                DataFormat::U8(bytes) => self.sent.push((true, bytes.to_vec())),
                _ => return Err(display_interface::DisplayError::DataFormatNotImplemented),
            }
            Ok(())
        }

        fn send_data(&mut self, buf: DataFormat<'_>) -> Result<(), display_interface::DisplayError> {
            match buf {
                DataFormat::U8(bytes) => self.sent.push((false, bytes.to_vec())),
                _ => return Err(display_interface::DisplayError::DataFormatNotImplemented),
            }
            Ok(())
        }
    }

    #[test]
    fn test_reserved_addresses() {
        assert!(is_reserved_i2c_address(0x00));
        assert!(is_reserved_i2c_address(0x07));
        assert!(is_reserved_i2c_address(0x78));
        assert!(is_reserved_i2c_address(0x7F));
        assert!(!is_reserved_i2c_address(0x3C));
        assert!(!is_reserved_i2c_address(0x3D));
    }

    #[test]
    fn test_i2c_port_rejects_bad_address() {
        assert!(I2cPort::new(RecordingBus::default(), 0x80).is_err());
        assert!(I2cPort::new(RecordingBus::default(), 0x03).is_err());
        assert!(I2cPort::new(RecordingBus::default(), 0x7C).is_err());
        assert!(I2cPort::new(RecordingBus::default(), 0x3C).is_ok());
    }

    #[test]
    fn test_i2c_port_control_bytes() {
        let mut port = I2cPort::new(RecordingBus::default(), 0x3C).unwrap();
        port.write_command(&[0x81, 0x7F]).unwrap();
        port.write_data(&[0xAA, 0x55, 0xFF]).unwrap();
        port.write_data(&[]).unwrap();

        let bus = port.release();
        assert_eq!(
            bus.transactions,
            vec![(0x3C, vec![0x00, 0x81, 0x7F]), (0x3C, vec![0x40, 0xAA, 0x55, 0xFF])]
        );
    }

    #[test]
    fn test_i2c_port_maps_errors() {
        let bus = RecordingBus { nack: true, ..Default::default() };
        let mut port = I2cPort::new(bus, 0x3D).unwrap();
        let err = port.write_command(&[0xAF]).unwrap_err();
        assert!(matches!(err, DisplayError::I2cError(ref msg) if msg.contains("0x3D")));
    }

    #[test]
    fn test_interface_port() {
        let mut port = InterfacePort::new(RecordingInterface::default());
        port.write_command(&[0xAE]).unwrap();
        port.write_data(&[1, 2, 3]).unwrap();
        let interface = port.release();
        assert_eq!(interface.sent, vec![(true, vec![0xAE]), (false, vec![1, 2, 3])]);
    }
}
