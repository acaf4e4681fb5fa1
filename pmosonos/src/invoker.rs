//! Seam between the queue logic and the device.
//!
//! Everything the queue needs from a device goes through
//! [`RemoteInvoker::invoke`]: a named action, sent to one of the
//! [`Service`]s, with string arguments, answered by the action's
//! out-arguments.

use std::fmt;

use pmoupnp::soap::ActionResponse;

use crate::errors::ControlPointError;

/// UPnP services of a Sonos zone player used by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Service {
    AvTransport,
    ContentDirectory,
}

impl Service {
    /// Service name as used in URNs and control paths.
    pub fn name(self) -> &'static str {
        match self {
            Service::AvTransport => "AVTransport",
            Service::ContentDirectory => "ContentDirectory",
        }
    }

    /// Embedded device hosting the service.
    pub fn device(self) -> &'static str {
        match self {
            Service::AvTransport => "MediaRenderer",
            Service::ContentDirectory => "MediaServer",
        }
    }

    /// `urn:schemas-upnp-org:service:{Service}:1`
    pub fn urn(self) -> String {
        format!("urn:schemas-upnp-org:service:{}:1", self.name())
    }

    /// `/{Device}/{Service}/Control`
    pub fn control_path(self) -> String {
        format!("/{}/{}/Control", self.device(), self.name())
    }

    /// AVTransport actions are addressed to an instance and need an
    /// `InstanceID` argument.
    pub fn needs_instance_id(self) -> bool {
        matches!(self, Service::AvTransport)
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Sends UPnP actions to a device.
///
/// `args` are the action's in-arguments in declaration order, without
/// `InstanceID`: implementations add it for the services that need it.
pub trait RemoteInvoker {
    fn invoke(
        &self,
        service: Service,
        action: &str,
        args: &[(&str, String)],
    ) -> Result<ActionResponse, ControlPointError>;
}

impl<T: RemoteInvoker + ?Sized> RemoteInvoker for &T {
    fn invoke(
        &self,
        service: Service,
        action: &str,
        args: &[(&str, String)],
    ) -> Result<ActionResponse, ControlPointError> {
        (**self).invoke(service, action, args)
    }
}
