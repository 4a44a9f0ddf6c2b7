//! Typed control surface for an LG TV.

use std::sync::Mutex as StdMutex;

use crate::connection::{ConnectOptions, Connection, DisconnectCallback};
use crate::error::{LgTvError, Result};
use crate::protocol::{Command, Response, MAX_DATA};
use crate::types::{Config3D, EnergySaving, Input, RemoteKeyCode};

/// Data byte asking the TV to report a setting's current value.
const READ_CURRENT: u8 = 0xFF;

/// Callback invoked after every successful typed mutation, so a host can
/// refresh whatever state it mirrors.
pub type StateChangedCallback = Box<dyn Fn() + Send + Sync>;

/// Wire address of one controllable setting.
#[derive(Debug, Clone, Copy)]
struct Attribute {
    command1: char,
    command2: char,
}

const POWER: Attribute = Attribute { command1: 'k', command2: 'a' };
const MUTE: Attribute = Attribute { command1: 'k', command2: 'e' };
const VOLUME: Attribute = Attribute { command1: 'k', command2: 'f' };
const CONTRAST: Attribute = Attribute { command1: 'k', command2: 'g' };
const BRIGHTNESS: Attribute = Attribute { command1: 'k', command2: 'h' };
const COLOR: Attribute = Attribute { command1: 'k', command2: 'i' };
const SHARPNESS: Attribute = Attribute { command1: 'k', command2: 'k' };
const REMOTE_LOCK: Attribute = Attribute { command1: 'k', command2: 'm' };
const TREBLE: Attribute = Attribute { command1: 'k', command2: 'r' };
const BASS: Attribute = Attribute { command1: 'k', command2: 's' };
const BALANCE: Attribute = Attribute { command1: 'k', command2: 't' };
const COLOR_TEMPERATURE: Attribute = Attribute { command1: 'x', command2: 'u' };
const INPUT: Attribute = Attribute { command1: 'x', command2: 'b' };
const THREE_D: Attribute = Attribute { command1: 'x', command2: 't' };
const ENERGY_SAVING: Attribute = Attribute { command1: 'j', command2: 'q' };
const REMOTE_KEY: Attribute = Attribute { command1: 'm', command2: 'c' };

/// Control an LG TV over its serial port.
///
/// All getters return `Ok(None)` when the TV does not answer, answers with
/// garbage, or reports a failure status. Treat that as "value unknown":
/// not every firmware answers every query, and a powered-down panel
/// answers very little.
pub struct LgTv {
    connection: Connection,
    set_id: u8,
    on_state_changed: StdMutex<Option<StateChangedCallback>>,
}

impl LgTv {
    /// Connect to the TV at `url`.
    ///
    /// `url` is a serial device path (`/dev/ttyUSB0`, `COM3`) or a
    /// `socket://host:port` address for a TCP-to-serial bridge. Opening
    /// the channel does not prove a TV is listening; issue a getter and
    /// check for `Some` to establish liveness.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use lgtv_serial::{ConnectOptions, LgTv};
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let tv = LgTv::connect("/dev/ttyUSB0", ConnectOptions::default()).await?;
    ///     if tv.get_power_on().await?.is_some() {
    ///         println!("TV is answering");
    ///     }
    ///     tv.close().await;
    ///     Ok(())
    /// }
    /// ```
    pub async fn connect(url: &str, options: ConnectOptions) -> Result<Self> {
        if options.set_id > 99 {
            return Err(LgTvError::InvalidArgument(format!(
                "set_id {} out of range 0-99",
                options.set_id
            )));
        }
        let connection = Connection::connect(url, &options).await?;
        Ok(Self {
            connection,
            set_id: options.set_id,
            on_state_changed: StdMutex::new(None),
        })
    }

    /// Register a callback for unexpected connection loss.
    ///
    /// Fires at most once per connection and never on an explicit
    /// [`close`](Self::close). Reconnecting afterwards is the caller's
    /// responsibility; this library never reopens the channel by itself.
    pub fn set_on_disconnect(&self, callback: DisconnectCallback) {
        self.connection.set_on_disconnect(callback);
    }

    /// Register a callback fired after every successful typed mutation.
    pub fn set_on_state_changed(&self, callback: StateChangedCallback) {
        *self.on_state_changed.lock().unwrap() = Some(callback);
    }

    /// Close the connection. Does not fire the disconnect callback.
    pub async fn close(&self) {
        self.connection.close().await;
    }

    // ========== Power ==========

    pub async fn set_power_on(&self, value: bool) -> Result<()> {
        self.write(POWER, u8::from(value)).await
    }

    pub async fn get_power_on(&self) -> Result<Option<bool>> {
        Ok(self.read(POWER).await?.map(|value| value == 1))
    }

    // ========== Volume and Mute ==========

    pub async fn set_mute(&self, mute: bool) -> Result<()> {
        // Data 00 is mute on and 01 is mute off, per the control manual.
        self.write(MUTE, if mute { 0x00 } else { 0x01 }).await
    }

    pub async fn get_mute(&self) -> Result<Option<bool>> {
        // The mute query carries a leading 00 before the FF probe byte.
        let mut data = [None; MAX_DATA];
        data[0] = Some(0x00);
        data[1] = Some(READ_CURRENT);
        let response = self
            .send(Command::with_data(MUTE.command1, MUTE.command2, self.set_id, data))
            .await?;
        Ok(response
            .filter(|response| response.status_ok)
            .map(|response| response.data0 == 0))
    }

    /// Set the volume, 0-100.
    pub async fn set_volume(&self, value: u8) -> Result<()> {
        self.write_level(VOLUME, value).await
    }

    pub async fn get_volume(&self) -> Result<Option<u8>> {
        self.read(VOLUME).await
    }

    // ========== Picture ==========

    /// Set the contrast, 0-100.
    pub async fn set_contrast(&self, value: u8) -> Result<()> {
        self.write_level(CONTRAST, value).await
    }

    pub async fn get_contrast(&self) -> Result<Option<u8>> {
        self.read(CONTRAST).await
    }

    /// Set the brightness, 0-100.
    pub async fn set_brightness(&self, value: u8) -> Result<()> {
        self.write_level(BRIGHTNESS, value).await
    }

    pub async fn get_brightness(&self) -> Result<Option<u8>> {
        self.read(BRIGHTNESS).await
    }

    /// Set the color saturation, 0-100.
    pub async fn set_color(&self, value: u8) -> Result<()> {
        self.write_level(COLOR, value).await
    }

    pub async fn get_color(&self) -> Result<Option<u8>> {
        self.read(COLOR).await
    }

    /// Set the sharpness, 0-100.
    pub async fn set_sharpness(&self, value: u8) -> Result<()> {
        self.write_level(SHARPNESS, value).await
    }

    pub async fn get_sharpness(&self) -> Result<Option<u8>> {
        self.read(SHARPNESS).await
    }

    /// Set the color temperature, 0-100.
    pub async fn set_color_temperature(&self, value: u8) -> Result<()> {
        self.write_level(COLOR_TEMPERATURE, value).await
    }

    pub async fn get_color_temperature(&self) -> Result<Option<u8>> {
        self.read(COLOR_TEMPERATURE).await
    }

    // ========== Sound ==========

    /// Set the treble, 0-100.
    pub async fn set_treble(&self, value: u8) -> Result<()> {
        self.write_level(TREBLE, value).await
    }

    pub async fn get_treble(&self) -> Result<Option<u8>> {
        self.read(TREBLE).await
    }

    /// Set the bass, 0-100.
    pub async fn set_bass(&self, value: u8) -> Result<()> {
        self.write_level(BASS, value).await
    }

    pub async fn get_bass(&self) -> Result<Option<u8>> {
        self.read(BASS).await
    }

    /// Set the left/right balance, 0-100 with 50 centered.
    pub async fn set_balance(&self, value: u8) -> Result<()> {
        self.write_level(BALANCE, value).await
    }

    pub async fn get_balance(&self) -> Result<Option<u8>> {
        self.read(BALANCE).await
    }

    // ========== Input Selection ==========

    pub async fn set_input(&self, input: Input) -> Result<()> {
        self.write(INPUT, input as u8).await
    }

    pub async fn get_input(&self) -> Result<Option<Input>> {
        Ok(self.read(INPUT).await?.map(Input::from))
    }

    // ========== Remote Control ==========

    pub async fn set_remote_control_lock(&self, value: bool) -> Result<()> {
        self.write(REMOTE_LOCK, u8::from(value)).await
    }

    pub async fn get_remote_control_lock(&self) -> Result<Option<bool>> {
        Ok(self.read(REMOTE_LOCK).await?.map(|value| value == 1))
    }

    /// Send a remote control key code, as if a button had been pressed.
    pub async fn remote_key(&self, code: RemoteKeyCode) -> Result<()> {
        self.write(REMOTE_KEY, code as u8).await
    }

    // ========== Modes ==========

    pub async fn set_energy_saving(&self, mode: EnergySaving) -> Result<()> {
        self.write(ENERGY_SAVING, mode as u8).await
    }

    pub async fn get_energy_saving(&self) -> Result<Option<EnergySaving>> {
        Ok(self.read(ENERGY_SAVING).await?.map(EnergySaving::from))
    }

    /// Configure 3D playback.
    ///
    /// There is no matching getter; the 3D status query goes unanswered on
    /// the hardware this was written against.
    pub async fn set_3d(&self, config: Config3D) -> Result<()> {
        let mut data = [None; MAX_DATA];
        data[0] = Some(config.mode as u8);
        data[1] = Some(config.encoding as u8);
        data[2] = Some(u8::from(config.right_to_left));
        data[3] = Some(config.depth);
        self.send(Command::with_data(
            THREE_D.command1,
            THREE_D.command2,
            self.set_id,
            data,
        ))
        .await?;
        self.notify_state_changed();
        Ok(())
    }

    // ========== Escape Hatch ==========

    /// Send an arbitrary command, bypassing the typed accessors.
    ///
    /// `data` must hold 1 to 6 leading values with no internal gaps.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use lgtv_serial::{ConnectOptions, LgTv};
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// # let tv = LgTv::connect("/dev/ttyUSB0", ConnectOptions::default()).await?;
    /// // Query the screen mute state, which has no typed accessor.
    /// let response = tv.send_raw('k', 'd', &[Some(0xFF)]).await?;
    /// println!("screen mute: {:?}", response.map(|r| r.data0));
    /// # Ok(())
    /// # }
    /// ```
    pub async fn send_raw(
        &self,
        command1: char,
        command2: char,
        data: &[Option<u8>],
    ) -> Result<Option<Response>> {
        if !command1.is_ascii() || !command2.is_ascii() {
            return Err(LgTvError::InvalidArgument(
                "command letters must be ASCII".to_string(),
            ));
        }
        if data.is_empty() || data.len() > MAX_DATA || data[0].is_none() {
            return Err(LgTvError::InvalidArgument(
                "data must hold 1 to 6 leading values".to_string(),
            ));
        }

        let mut slots = [None; MAX_DATA];
        let mut gap = false;
        for (index, value) in data.iter().enumerate() {
            match value {
                Some(_) if gap => {
                    return Err(LgTvError::InvalidArgument(format!(
                        "data slot {index} is set after a gap"
                    )));
                }
                Some(value) => slots[index] = Some(*value),
                None => gap = true,
            }
        }

        self.send(Command::with_data(command1, command2, self.set_id, slots))
            .await
    }

    async fn send(&self, command: Command) -> Result<Option<Response>> {
        self.connection.send_command(&command).await
    }

    async fn write(&self, attribute: Attribute, data0: u8) -> Result<()> {
        self.send(Command::new(
            attribute.command1,
            attribute.command2,
            self.set_id,
            data0,
        ))
        .await?;
        self.notify_state_changed();
        Ok(())
    }

    async fn write_level(&self, attribute: Attribute, value: u8) -> Result<()> {
        if value > 100 {
            return Err(LgTvError::InvalidArgument(format!(
                "value {value} out of range 0-100"
            )));
        }
        self.write(attribute, value).await
    }

    async fn read(&self, attribute: Attribute) -> Result<Option<u8>> {
        let response = self
            .send(Command::new(
                attribute.command1,
                attribute.command2,
                self.set_id,
                READ_CURRENT,
            ))
            .await?;
        Ok(response
            .filter(|response| response.status_ok)
            .map(|response| response.data0))
    }

    fn notify_state_changed(&self) {
        if let Some(callback) = self.on_state_changed.lock().unwrap().as_ref() {
            callback();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::spawn_device;
    use crate::types::{Encoding3D, Mode3D};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tokio::io::DuplexStream;

    fn tv_pair() -> (LgTv, DuplexStream) {
        let (near, far) = tokio::io::duplex(256);
        let tv = LgTv {
            connection: Connection::from_stream(near),
            set_id: 0,
            on_state_changed: StdMutex::new(None),
        };
        (tv, far)
    }

    #[tokio::test]
    async fn get_power_on_maps_data_byte_to_bool() {
        let (tv, far) = tv_pair();
        spawn_device(far, |line| {
            assert_eq!(line, "ka 00 FF");
            Some(b"a 00 OK01x".to_vec())
        });
        assert_eq!(tv.get_power_on().await.unwrap(), Some(true));
    }

    #[tokio::test]
    async fn not_ok_status_reads_as_unknown() {
        let (tv, far) = tv_pair();
        spawn_device(far, |_| Some(b"a 00 NG01x".to_vec()));
        assert_eq!(tv.get_power_on().await.unwrap(), None);
    }

    #[tokio::test]
    async fn mute_query_carries_leading_zero_byte() {
        let (tv, far) = tv_pair();
        spawn_device(far, |line| {
            assert_eq!(line, "ke 00 00 FF");
            Some(b"e 00 OK00x".to_vec())
        });
        assert_eq!(tv.get_mute().await.unwrap(), Some(true));
    }

    #[tokio::test]
    async fn set_mute_uses_inverted_polarity() {
        let (tv, far) = tv_pair();
        spawn_device(far, |line| {
            assert_eq!(line, "ke 00 00");
            Some(b"e 00 OK00x".to_vec())
        });
        tv.set_mute(true).await.unwrap();
    }

    #[tokio::test]
    async fn out_of_range_level_is_rejected_before_any_write() {
        let (tv, far) = tv_pair();
        let device = spawn_device(far, |_| None);

        let result = tv.set_volume(101).await;
        assert!(matches!(result, Err(LgTvError::InvalidArgument(_))));
        let result = tv.set_contrast(200).await;
        assert!(matches!(result, Err(LgTvError::InvalidArgument(_))));

        tv.close().await;
        assert!(device.await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn input_maps_to_enum_with_unknown_fallback() {
        let (tv, far) = tv_pair();
        let mut calls = 0;
        spawn_device(far, move |line| {
            assert_eq!(line, "xb 00 FF");
            calls += 1;
            if calls == 1 {
                Some(b"b 00 OK90x".to_vec())
            } else {
                Some(b"b 00 OK55x".to_vec())
            }
        });
        assert_eq!(tv.get_input().await.unwrap(), Some(Input::Hdmi1));
        assert_eq!(tv.get_input().await.unwrap(), Some(Input::Unknown));
    }

    #[tokio::test]
    async fn set_input_sends_the_raw_source_value() {
        let (tv, far) = tv_pair();
        spawn_device(far, |line| {
            assert_eq!(line, "xb 00 91");
            Some(b"b 00 OK91x".to_vec())
        });
        tv.set_input(Input::Hdmi2).await.unwrap();
    }

    #[tokio::test]
    async fn set_3d_sends_all_four_config_bytes() {
        let (tv, far) = tv_pair();
        spawn_device(far, |line| {
            assert_eq!(line, "xt 00 03 01 01 0A");
            Some(b"t 00 OK03x".to_vec())
        });
        tv.set_3d(Config3D {
            mode: Mode3D::To3d,
            encoding: Encoding3D::SideBySide,
            right_to_left: true,
            depth: 10,
        })
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn state_changed_fires_after_successful_mutation_only() {
        let (tv, far) = tv_pair();
        spawn_device(far, |_| Some(b"f 00 OK14x".to_vec()));

        let fired = Arc::new(AtomicUsize::new(0));
        let counter = fired.clone();
        tv.set_on_state_changed(Box::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        }));

        tv.set_volume(20).await.unwrap();
        assert_eq!(fired.load(Ordering::SeqCst), 1);

        let result = tv.set_volume(101).await;
        assert!(matches!(result, Err(LgTvError::InvalidArgument(_))));
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn send_raw_rejects_internal_gaps_before_any_write() {
        let (tv, far) = tv_pair();
        let device = spawn_device(far, |_| None);

        let result = tv.send_raw('k', 'e', &[Some(1), None, Some(3)]).await;
        assert!(matches!(result, Err(LgTvError::InvalidArgument(_))));
        let result = tv.send_raw('k', 'e', &[]).await;
        assert!(matches!(result, Err(LgTvError::InvalidArgument(_))));
        let result = tv.send_raw('k', 'e', &[None, Some(1)]).await;
        assert!(matches!(result, Err(LgTvError::InvalidArgument(_))));

        tv.close().await;
        assert!(device.await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn send_raw_forwards_all_leading_values() {
        let (tv, far) = tv_pair();
        spawn_device(far, |line| {
            assert_eq!(line, "xt 00 00 01 00 14");
            Some(b"t 00 OK00x".to_vec())
        });

        let response = tv
            .send_raw('x', 't', &[Some(0x00), Some(0x01), Some(0x00), Some(0x14)])
            .await
            .unwrap();
        assert!(response.unwrap().status_ok);
    }
}
