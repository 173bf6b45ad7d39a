//! Connection supervisor for the console-side central.
//!
//! Drives scan -> connect -> discover/subscribe -> (on loss) rescan,
//! entirely in the cooperative poll context. Discovery events only
//! record intent; the connection attempt itself happens in
//! [`LinkSupervisor::drive`], never inside the event path.

use log::{info, warn};
use nespad_proto::{PAD_SERVICE_UUID, PAD_STATE_UUID};

use crate::link::{CentralEvent, CentralRadio, LinkError, LinkSession, PeerAddr};

/// Link lifecycle states.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkState {
    /// No radio activity yet.
    Disconnected,
    /// Waiting for a matching advertisement.
    Scanning,
    /// Candidate captured, scan halted; connect deferred to the next
    /// drive step.
    ConnectRequested(PeerAddr),
    /// Session established.
    Connected(LinkSession),
}

/// State machine pairing the console node with the controller node.
#[derive(Debug)]
pub struct LinkSupervisor {
    state: LinkState,
}

impl LinkSupervisor {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: LinkState::Disconnected,
        }
    }

    #[must_use]
    pub fn state(&self) -> LinkState {
        self.state
    }

    #[must_use]
    pub fn is_connected(&self) -> bool {
        matches!(self.state, LinkState::Connected(_))
    }

    /// Current session, if one is established.
    #[must_use]
    pub fn session(&self) -> Option<LinkSession> {
        match self.state {
            LinkState::Connected(session) => Some(session),
            _ => None,
        }
    }

    /// Begin discovery.
    pub fn start<R: CentralRadio>(&mut self, radio: &mut R) -> Result<(), LinkError> {
        radio.start_scan()?;
        self.state = LinkState::Scanning;
        Ok(())
    }

    /// Feed one connection-lifecycle event from the transport.
    ///
    /// Notifications are not session events; they belong to the receive
    /// path and are ignored here.
    pub fn handle_event<R: CentralRadio>(&mut self, event: CentralEvent, radio: &mut R) {
        match event {
            CentralEvent::AdvertisementMatched(addr) => match self.state {
                // a later advertisement replaces an unconsumed candidate
                LinkState::Scanning | LinkState::ConnectRequested(_) => {
                    info!("found pad node {addr}, deferring connect");
                    let _ = radio.stop_scan();
                    self.state = LinkState::ConnectRequested(addr);
                }
                LinkState::Disconnected | LinkState::Connected(_) => {}
            },
            CentralEvent::Disconnected => {
                info!("link lost, rescanning");
                self.state = LinkState::Scanning;
                // restart is idempotent even if discovery never stopped
                if let Err(err) = radio.start_scan() {
                    warn!("scan restart failed: {err:?}");
                }
            }
            CentralEvent::Notification(_) => {}
        }
    }

    /// Cooperative step: perform the deferred connect attempt, if any.
    ///
    /// A failed attempt is logged and the supervisor returns to
    /// `Scanning` without rearming discovery - the next matching
    /// advertisement, should discovery still be running, is the only
    /// retry trigger. A connect that succeeds but whose service or
    /// characteristic discovery fails leaves the session up with
    /// `subscribed = false` and no data path.
    pub fn drive<R: CentralRadio>(&mut self, radio: &mut R) {
        let LinkState::ConnectRequested(addr) = self.state else {
            return;
        };
        match radio.connect(addr) {
            Ok(()) => {
                let subscribed = match radio.subscribe(PAD_SERVICE_UUID, PAD_STATE_UUID) {
                    Ok(()) => true,
                    Err(err) => {
                        warn!("subscribe on {addr} failed: {err:?}");
                        false
                    }
                };
                info!("connected to {addr}");
                self.state = LinkState::Connected(LinkSession { addr, subscribed });
            }
            Err(err) => {
                warn!("connect to {addr} failed: {err:?}");
                self.state = LinkState::Scanning;
            }
        }
    }
}

impl Default for LinkSupervisor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::link::NotifyPayload;
    use nespad_proto::Uuid128;
    use std::collections::VecDeque;
    use std::vec::Vec;

    const PAD_ADDR: PeerAddr = PeerAddr([0x24, 0x6f, 0x28, 0xaa, 0xbb, 0xcc]);
    const OTHER_ADDR: PeerAddr = PeerAddr([0x24, 0x6f, 0x28, 0x11, 0x22, 0x33]);

    #[derive(Default)]
    struct MockCentral {
        scan_starts: usize,
        scan_stops: usize,
        connects: Vec<PeerAddr>,
        subscribes: Vec<(Uuid128, Uuid128)>,
        connect_results: VecDeque<Result<(), LinkError>>,
        subscribe_results: VecDeque<Result<(), LinkError>>,
    }

    impl CentralRadio for MockCentral {
        fn start_scan(&mut self) -> Result<(), LinkError> {
            self.scan_starts += 1;
            Ok(())
        }

        fn stop_scan(&mut self) -> Result<(), LinkError> {
            self.scan_stops += 1;
            Ok(())
        }

        fn connect(&mut self, addr: PeerAddr) -> Result<(), LinkError> {
            self.connects.push(addr);
            self.connect_results.pop_front().unwrap_or(Ok(()))
        }

        fn subscribe(&mut self, service: Uuid128, characteristic: Uuid128) -> Result<(), LinkError> {
            self.subscribes.push((service, characteristic));
            self.subscribe_results.pop_front().unwrap_or(Ok(()))
        }

        fn poll_event(&mut self) -> Option<CentralEvent> {
            None
        }
    }

    #[test]
    fn test_advertisement_defers_connect() {
        let mut radio = MockCentral::default();
        let mut sup = LinkSupervisor::new();
        sup.start(&mut radio).unwrap();

        sup.handle_event(CentralEvent::AdvertisementMatched(PAD_ADDR), &mut radio);
        assert_eq!(sup.state(), LinkState::ConnectRequested(PAD_ADDR));
        assert_eq!(radio.scan_stops, 1);
        // connect never happens from the event path
        assert!(radio.connects.is_empty());
    }

    #[test]
    fn test_drive_connects_and_subscribes() {
        let mut radio = MockCentral::default();
        let mut sup = LinkSupervisor::new();
        sup.start(&mut radio).unwrap();
        sup.handle_event(CentralEvent::AdvertisementMatched(PAD_ADDR), &mut radio);

        sup.drive(&mut radio);
        assert_eq!(radio.connects, [PAD_ADDR]);
        assert_eq!(
            radio.subscribes,
            [(nespad_proto::PAD_SERVICE_UUID, nespad_proto::PAD_STATE_UUID)]
        );
        assert_eq!(
            sup.session(),
            Some(LinkSession {
                addr: PAD_ADDR,
                subscribed: true
            })
        );
    }

    #[test]
    fn test_connect_failure_waits_for_next_advertisement() {
        let mut radio = MockCentral::default();
        radio.connect_results.push_back(Err(LinkError::ConnectFailed));
        let mut sup = LinkSupervisor::new();
        sup.start(&mut radio).unwrap();
        sup.handle_event(CentralEvent::AdvertisementMatched(PAD_ADDR), &mut radio);

        sup.drive(&mut radio);
        assert_eq!(sup.state(), LinkState::Scanning);
        // no retry timer and no rescan; only the initial scan start
        assert_eq!(radio.scan_starts, 1);

        // a later advertisement drives the retry
        sup.handle_event(CentralEvent::AdvertisementMatched(PAD_ADDR), &mut radio);
        sup.drive(&mut radio);
        assert!(sup.is_connected());
    }

    #[test]
    fn test_subscribe_failure_keeps_session_without_data_path() {
        let mut radio = MockCentral::default();
        radio
            .subscribe_results
            .push_back(Err(LinkError::ServiceNotFound));
        let mut sup = LinkSupervisor::new();
        sup.start(&mut radio).unwrap();
        sup.handle_event(CentralEvent::AdvertisementMatched(PAD_ADDR), &mut radio);

        sup.drive(&mut radio);
        assert_eq!(
            sup.session(),
            Some(LinkSession {
                addr: PAD_ADDR,
                subscribed: false
            })
        );
        // no teardown, no further attempts
        sup.drive(&mut radio);
        assert_eq!(radio.connects.len(), 1);
    }

    #[test]
    fn test_disconnect_restarts_scanning() {
        let mut radio = MockCentral::default();
        let mut sup = LinkSupervisor::new();
        sup.start(&mut radio).unwrap();
        sup.handle_event(CentralEvent::AdvertisementMatched(PAD_ADDR), &mut radio);
        sup.drive(&mut radio);
        assert!(sup.is_connected());

        sup.handle_event(CentralEvent::Disconnected, &mut radio);
        assert_eq!(sup.state(), LinkState::Scanning);
        assert_eq!(radio.scan_starts, 2);
    }

    #[test]
    fn test_later_advertisement_replaces_candidate() {
        let mut radio = MockCentral::default();
        let mut sup = LinkSupervisor::new();
        sup.start(&mut radio).unwrap();
        sup.handle_event(CentralEvent::AdvertisementMatched(PAD_ADDR), &mut radio);
        sup.handle_event(CentralEvent::AdvertisementMatched(OTHER_ADDR), &mut radio);

        sup.drive(&mut radio);
        assert_eq!(radio.connects, [OTHER_ADDR]);
    }

    #[test]
    fn test_notifications_do_not_touch_the_session() {
        let mut radio = MockCentral::default();
        let mut sup = LinkSupervisor::new();
        sup.start(&mut radio).unwrap();

        let mut payload = NotifyPayload::new();
        payload.push(0x05).unwrap();
        sup.handle_event(CentralEvent::Notification(payload), &mut radio);
        assert_eq!(sup.state(), LinkState::Scanning);
    }
}
