use std::time::Duration;

use pmoconfig::Config;
use pmoupnp::soap::{ActionResponse, parse_action_response, parse_upnp_error};
use tracing::debug;

use crate::errors::ControlPointError;
use crate::invoker::{RemoteInvoker, Service};
use crate::queue::{Queue, QueueOptions};
use crate::soap_client::invoke_upnp_action_with_timeout;
use crate::{DEFAULT_DEVICE_PORT, DEFAULT_HTTP_TIMEOUT};

/// A Sonos zone player reached over SOAP/HTTP.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SonosController {
    host: String,
    port: u16,
    timeout: Option<Duration>,
}

impl SonosController {
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: DEFAULT_DEVICE_PORT,
            timeout: Some(DEFAULT_HTTP_TIMEOUT),
        }
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// `None` disables the per-call timeout.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Controller for `host` with the port and timeout of the `device`
    /// configuration section.
    pub fn from_config(host: impl Into<String>, config: &Config) -> Self {
        Self::new(host)
            .with_port(config.get_device_port())
            .with_timeout(Some(Duration::from_secs(config.get_http_timeout_secs())))
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn control_url(&self, service: Service) -> String {
        format!("http://{}:{}{}", self.host, self.port, service.control_path())
    }

    /// The default queue, with default options.
    pub fn queue(&self) -> Queue<'_, Self> {
        Queue::new(self, QueueOptions::default())
    }

    pub fn queue_with_options(&self, options: QueueOptions) -> Queue<'_, Self> {
        Queue::new(self, options)
    }
}

impl RemoteInvoker for SonosController {
    fn invoke(
        &self,
        service: Service,
        action: &str,
        args: &[(&str, String)],
    ) -> Result<ActionResponse, ControlPointError> {
        let control_url = self.control_url(service);
        let service_type = service.urn();

        let mut call_args: Vec<(&str, &str)> = Vec::with_capacity(args.len() + 1);
        if service.needs_instance_id() {
            call_args.push(("InstanceID", "0"));
        }
        call_args.extend(args.iter().map(|(k, v)| (*k, v.as_str())));

        let call_result = invoke_upnp_action_with_timeout(
            &control_url,
            &service_type,
            action,
            &call_args,
            self.timeout,
        )?;

        // Faults come back as HTTP 500, some firmwares send them with 200.
        if let Some(env) = &call_result.envelope {
            if let Some(error) = parse_upnp_error(env) {
                debug!(
                    action,
                    code = error.error_code,
                    status = call_result.status.as_u16(),
                    "UPnP fault"
                );
                return Err(ControlPointError::UpnpFault {
                    action: action.to_string(),
                    error,
                });
            }
        }

        if !call_result.status.is_success() {
            return Err(ControlPointError::SoapStatus(
                action.to_string(),
                call_result.status.as_u16(),
                call_result.raw_body,
            ));
        }

        let envelope = call_result.envelope.as_ref().ok_or_else(|| {
            ControlPointError::SoapEnvelope(
                action.to_string(),
                "response body is not a SOAP envelope".to_string(),
            )
        })?;

        parse_action_response(envelope, action)
            .map_err(|e| ControlPointError::soap_envelope(action, e))
    }
}
