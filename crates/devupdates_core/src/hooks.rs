//! Host extension points.
//!
//! The host exposes named points in its update lifecycle. Components
//! implement [`Subscriber`] and register plain filter functions against
//! those points at startup; the host later runs each point's filters in
//! priority order, threading the value through them.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use crate::host::{HookExtra, PluginInfo, PluginInfoRequest, UpdateTransient};
use crate::notifications::{NotificationKind, UpdateEmail};

/// Priority used when a subscriber has no reason to pick another.
pub const DEFAULT_PRIORITY: i32 = 10;

/// A named point in the host's update lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExtensionPoint {
    /// Before the update-check aggregate is saved.
    PreSetUpdateTransient,
    /// A request for full package details.
    PluginsApi,
    /// After an update archive was extracted, before it is moved into place.
    UpgraderSourceSelection,
    /// Whether an automatic-update email is sent.
    AutoUpdateSendEmail,
    /// Rewrite of an automatic-update email.
    AutoUpdateEmail,
}

impl ExtensionPoint {
    pub const ALL: [ExtensionPoint; 5] = [
        Self::PreSetUpdateTransient,
        Self::PluginsApi,
        Self::UpgraderSourceSelection,
        Self::AutoUpdateSendEmail,
        Self::AutoUpdateEmail,
    ];

    /// The host's name for this point.
    pub fn name(self) -> &'static str {
        match self {
            Self::PreSetUpdateTransient => "pre_set_site_transient_update_plugins",
            Self::PluginsApi => "plugins_api",
            Self::UpgraderSourceSelection => "upgrader_source_selection",
            Self::AutoUpdateSendEmail => "auto_update_send_email",
            Self::AutoUpdateEmail => "auto_update_email",
        }
    }
}

impl fmt::Display for ExtensionPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Something that registers filters with the host.
pub trait Subscriber: Send + Sync + 'static {
    fn subscribe(self: Arc<Self>, hooks: &mut HookRegistry);
}

type TransientFilter = dyn Fn(UpdateTransient) -> UpdateTransient + Send + Sync;
type PluginsApiFilter =
    dyn Fn(Option<PluginInfo>, &str, &PluginInfoRequest) -> Option<PluginInfo> + Send + Sync;
type SourceSelectionFilter = dyn Fn(PathBuf, &HookExtra) -> PathBuf + Send + Sync;
type SendEmailFilter = dyn Fn(bool, &NotificationKind) -> bool + Send + Sync;
type EmailFilter = dyn Fn(UpdateEmail) -> UpdateEmail + Send + Sync;

struct Filters<F: ?Sized> {
    entries: Vec<(i32, Box<F>)>,
}

impl<F: ?Sized> Default for Filters<F> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<F: ?Sized> Filters<F> {
    // Stable sort: equal priorities run in registration order.
    fn insert(&mut self, priority: i32, filter: Box<F>) {
        self.entries.push((priority, filter));
        self.entries.sort_by_key(|(priority, _)| *priority);
    }

    fn iter(&self) -> impl Iterator<Item = &F> {
        self.entries.iter().map(|(_, filter)| filter.as_ref())
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Filters registered per extension point.
#[derive(Default)]
pub struct HookRegistry {
    update_transient: Filters<TransientFilter>,
    plugins_api: Filters<PluginsApiFilter>,
    source_selection: Filters<SourceSelectionFilter>,
    send_email: Filters<SendEmailFilter>,
    email: Filters<EmailFilter>,
}

impl fmt::Debug for HookRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for point in ExtensionPoint::ALL {
            map.entry(&point.name(), &self.count(point));
        }
        map.finish()
    }
}

impl HookRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lets `subscriber` register its filters.
    pub fn register<S: Subscriber>(&mut self, subscriber: Arc<S>) {
        subscriber.subscribe(self);
    }

    /// Number of filters registered at `point`.
    pub fn count(&self, point: ExtensionPoint) -> usize {
        match point {
            ExtensionPoint::PreSetUpdateTransient => self.update_transient.len(),
            ExtensionPoint::PluginsApi => self.plugins_api.len(),
            ExtensionPoint::UpgraderSourceSelection => self.source_selection.len(),
            ExtensionPoint::AutoUpdateSendEmail => self.send_email.len(),
            ExtensionPoint::AutoUpdateEmail => self.email.len(),
        }
    }

    pub fn add_update_transient_filter<F>(&mut self, priority: i32, filter: F)
    where
        F: Fn(UpdateTransient) -> UpdateTransient + Send + Sync + 'static,
    {
        self.update_transient.insert(priority, Box::new(filter));
    }

    pub fn add_plugins_api_filter<F>(&mut self, priority: i32, filter: F)
    where
        F: Fn(Option<PluginInfo>, &str, &PluginInfoRequest) -> Option<PluginInfo>
            + Send
            + Sync
            + 'static,
    {
        self.plugins_api.insert(priority, Box::new(filter));
    }

    pub fn add_source_selection_filter<F>(&mut self, priority: i32, filter: F)
    where
        F: Fn(PathBuf, &HookExtra) -> PathBuf + Send + Sync + 'static,
    {
        self.source_selection.insert(priority, Box::new(filter));
    }

    pub fn add_send_email_filter<F>(&mut self, priority: i32, filter: F)
    where
        F: Fn(bool, &NotificationKind) -> bool + Send + Sync + 'static,
    {
        self.send_email.insert(priority, Box::new(filter));
    }

    pub fn add_email_filter<F>(&mut self, priority: i32, filter: F)
    where
        F: Fn(UpdateEmail) -> UpdateEmail + Send + Sync + 'static,
    {
        self.email.insert(priority, Box::new(filter));
    }

    pub fn apply_update_transient(&self, transient: UpdateTransient) -> UpdateTransient {
        self.update_transient
            .iter()
            .fold(transient, |value, filter| filter(value))
    }

    /// `None` means no subscriber answered the request.
    pub fn apply_plugins_api(
        &self,
        action: &str,
        request: &PluginInfoRequest,
    ) -> Option<PluginInfo> {
        self.plugins_api
            .iter()
            .fold(None, |value, filter| filter(value, action, request))
    }

    /// `source` is the extracted archive root; `hook_extra` describes the install.
    pub fn apply_source_selection(&self, source: PathBuf, hook_extra: &HookExtra) -> PathBuf {
        self.source_selection
            .iter()
            .fold(source, |value, filter| filter(value, hook_extra))
    }

    pub fn apply_send_email(&self, send: bool, kind: &NotificationKind) -> bool {
        self.send_email
            .iter()
            .fold(send, |value, filter| filter(value, kind))
    }

    pub fn apply_email(&self, email: UpdateEmail) -> UpdateEmail {
        self.email.iter().fold(email, |value, filter| filter(value))
    }
}
