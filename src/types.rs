//! Domain types for the controllable TV settings.

/// Input source selectable on the TV.
///
/// Raw values not in this table decode as [`Input::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Input {
    Dtv = 0x00,
    Cadtv = 0x01,
    SatelliteDtvIsdbBsJapan = 0x02,
    IsdbCs1Japan = 0x03,
    IsdbCs2Japan = 0x04,
    Catv = 0x11,
    Av1 = 0x20,
    Av2 = 0x21,
    Component1 = 0x40,
    Component2 = 0x41,
    Rgb = 0x60,
    Hdmi1 = 0x90,
    Hdmi2 = 0x91,
    Hdmi3 = 0x92,
    Hdmi4 = 0x93,
    Unknown = 0xFF,
}

impl From<u8> for Input {
    fn from(raw: u8) -> Self {
        match raw {
            0x00 => Input::Dtv,
            0x01 => Input::Cadtv,
            0x02 => Input::SatelliteDtvIsdbBsJapan,
            0x03 => Input::IsdbCs1Japan,
            0x04 => Input::IsdbCs2Japan,
            0x11 => Input::Catv,
            0x20 => Input::Av1,
            0x21 => Input::Av2,
            0x40 => Input::Component1,
            0x41 => Input::Component2,
            0x60 => Input::Rgb,
            0x90 => Input::Hdmi1,
            0x91 => Input::Hdmi2,
            0x92 => Input::Hdmi3,
            0x93 => Input::Hdmi4,
            other => {
                tracing::warn!("unknown input source value {other:#04X}");
                Input::Unknown
            }
        }
    }
}

/// Energy saving mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum EnergySaving {
    Off = 0x00,
    Minimum = 0x01,
    Medium = 0x02,
    Maximum = 0x03,
    Auto = 0x04,
    ScreenOff = 0x05,
    Unknown = 0xFF,
}

impl From<u8> for EnergySaving {
    fn from(raw: u8) -> Self {
        match raw {
            0x00 => EnergySaving::Off,
            0x01 => EnergySaving::Minimum,
            0x02 => EnergySaving::Medium,
            0x03 => EnergySaving::Maximum,
            0x04 => EnergySaving::Auto,
            0x05 => EnergySaving::ScreenOff,
            other => {
                tracing::warn!("unknown energy saving value {other:#04X}");
                EnergySaving::Unknown
            }
        }
    }
}

/// 3D display mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Mode3D {
    On = 0x00,
    Off = 0x01,
    To2d = 0x02,
    To3d = 0x03,
    Unknown = 0xFF,
}

/// Layout of the stereo image in the video signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Encoding3D {
    TopBottom = 0x00,
    SideBySide = 0x01,
    Checkerboard = 0x02,
    FrameSequential = 0x03,
    ColumnInterleaving = 0x04,
    RowInterleaving = 0x05,
    Unknown = 0xFF,
}

/// Full 3D playback configuration for [`LgTv::set_3d`](crate::LgTv::set_3d).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config3D {
    pub mode: Mode3D,
    pub encoding: Encoding3D,
    pub right_to_left: bool,
    pub depth: u8,
}

/// Remote control key codes accepted by
/// [`LgTv::remote_key`](crate::LgTv::remote_key).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum RemoteKeyCode {
    ChPlus = 0x00,
    ChMinus = 0x01,
    VolumePlus = 0x02,
    VolumeMinus = 0x03,
    ArrowRight = 0x06,
    ArrowLeft = 0x07,
    Power = 0x08,
    Mute = 0x09,
    Input = 0x0B,
    Sleep = 0x0E,
    TvRadio = 0x0F,
    Number0 = 0x10,
    Number1 = 0x11,
    Number2 = 0x12,
    Number3 = 0x13,
    Number4 = 0x14,
    Number5 = 0x15,
    Number6 = 0x16,
    Number7 = 0x17,
    Number8 = 0x18,
    Number9 = 0x19,
    QViewFlashback = 0x1A,
    Fav = 0x1E,
    Teletext = 0x20,
    TeletextOptions = 0x21,
    ReturnBack = 0x28,
    AvMode = 0x30,
    CaptionSubtitle = 0x39,
    ArrowUp = 0x40,
    ArrowDown = 0x41,
    MyApps = 0x42,
    MenuSettings = 0x43,
    OkEnter = 0x44,
    QMenu = 0x45,
    ListMinus = 0x4C,
    Picture = 0x4D,
    Sound = 0x52,
    List = 0x53,
    Exit = 0x5B,
    Pip = 0x60,
    Blue = 0x61,
    Yellow = 0x63,
    Green = 0x71,
    Red = 0x72,
    AspectRatio = 0x79,
    UserGuide = 0x7A,
    SmartHome = 0x7C,
    Simplink = 0x7E,
    Forward = 0x8E,
    Rewind = 0x8F,
    AudioDescription = 0x91,
    TvPc = 0x9B,
    LiveMenu = 0x9E,
    App = 0x9F,
    Autoconfig = 0x99,
    Info = 0xAA,
    ProgramGuide = 0xAB,
    Play = 0xB0,
    StopFilelist = 0xB1,
    Recent = 0xB5,
    FreezeSlowplayPause = 0xBA,
    Soccer = 0xBB,
    Rec = 0xBD,
    ThreeD = 0xDC,
}
