//! Radio capability seams shared by both nodes.
//!
//! The wireless transport is an external collaborator offering reliable
//! point-to-point advertise/scan/connect/subscribe/notify primitives.
//! Everything the nodes need from it sits behind these two traits, and
//! all transport callbacks surface as polled events consumed from the
//! cooperative context - the callback context itself forbids reentrant
//! session calls, so nothing here is invoked from it.

use heapless::Vec;
use nespad_proto::Uuid128;

/// Upper bound for a notification payload as delivered by the radio.
pub const MAX_NOTIFY_LEN: usize = 8;

/// Raw notification payload. A valid pad payload is exactly one byte;
/// length checking is the receiver's job, not the transport's.
pub type NotifyPayload = Vec<u8, MAX_NOTIFY_LEN>;

/// 48-bit peer address as exposed by the transport.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PeerAddr(pub [u8; 6]);

impl core::fmt::Display for PeerAddr {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let b = &self.0;
        write!(
            f,
            "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}",
            b[0], b[1], b[2], b[3], b[4], b[5]
        )
    }
}

/// Identity and data-path status of the one paired peer.
///
/// `subscribed` is false when service discovery after a successful
/// connect came up empty: the session is up but carries no data until
/// the peer drops the link. See [`LinkSupervisor::drive`].
///
/// [`LinkSupervisor::drive`]: crate::supervisor::LinkSupervisor::drive
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LinkSession {
    pub addr: PeerAddr,
    pub subscribed: bool,
}

/// Error type for link operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkError {
    /// Transport-level failure.
    Radio,
    /// Connection attempt was rejected or timed out.
    ConnectFailed,
    /// Peer connected but the expected service was not found.
    ServiceNotFound,
    /// Service present but the state characteristic was missing.
    CharacteristicNotFound,
    /// Characteristic exists but does not support notifications.
    NotifyUnsupported,
    /// Operation requires a live connection.
    NotConnected,
    /// The transport could not queue the request.
    Busy,
}

/// Events surfaced to the console-side central.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CentralEvent {
    /// An advertisement carrying the expected service identifier.
    AdvertisementMatched(PeerAddr),
    /// The active connection dropped.
    Disconnected,
    /// Inbound notification from the subscribed characteristic.
    Notification(NotifyPayload),
}

/// Events surfaced to the controller-side peripheral.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PeripheralEvent {
    /// A central connected and subscribed to the state characteristic.
    Connected,
    /// The subscriber dropped.
    Disconnected,
}

/// Central (scanning/connecting) role of the transport.
pub trait CentralRadio {
    /// Begin or resume discovery. Must be idempotent: restarting an
    /// already-running scan is a no-op, not an error.
    fn start_scan(&mut self) -> Result<(), LinkError>;

    /// Halt discovery.
    fn stop_scan(&mut self) -> Result<(), LinkError>;

    /// Establish a session with a previously discovered peer.
    fn connect(&mut self, addr: PeerAddr) -> Result<(), LinkError>;

    /// Discover the service/characteristic pair on the connected peer
    /// and subscribe to its notifications.
    fn subscribe(&mut self, service: Uuid128, characteristic: Uuid128) -> Result<(), LinkError>;

    /// Drain the next pending transport event, if any.
    fn poll_event(&mut self) -> Option<CentralEvent>;
}

/// Peripheral (advertising/accepting) role of the transport.
pub trait PeripheralRadio {
    /// Advertise the given service to scanners. A single subscriber is
    /// accepted; additional centrals are the transport's problem.
    fn start_advertising(&mut self, service: Uuid128) -> Result<(), LinkError>;

    /// Push a payload to the current subscriber.
    fn notify(&mut self, payload: &[u8]) -> Result<(), LinkError>;

    /// Drain the next pending transport event, if any.
    fn poll_event(&mut self) -> Option<PeripheralEvent>;
}
