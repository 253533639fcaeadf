//! In-memory `Surface` for controller tests.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeSet, HashMap, HashSet};
use std::time::Duration;

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use bos_api_types::{
    AccountAddress, AccountCreated, AccountDetail, SeedResponse, SendBosReceipt, SendBosRequest,
    TransactionRecord,
};
use bos_wallet_client::{InMemoryWalletApi, WalletApi};
use tokio::sync::Notify;

use crate::error::{ViewError, ViewResult};
use crate::pacing::Pacer;
use crate::surface::{Slot, Surface, Target};

#[derive(Debug, Default, Clone)]
pub struct Node {
    pub visible: Option<bool>,
    pub classes: BTreeSet<String>,
    pub text: Option<String>,
    pub children: Vec<String>,
    pub value: String,
}

/// Records element state keyed by selector. Every element exists unless
/// removed with [`RecordingSurface::remove`].
#[derive(Default)]
pub struct RecordingSurface {
    nodes: RefCell<HashMap<String, Node>>,
    missing: RefCell<HashSet<String>>,
    mutations: Cell<usize>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn remove(&self, target: impl Into<Target>) {
        self.missing.borrow_mut().insert(target.into().selector());
    }

    pub fn set_input(&self, slot: Slot, value: &str) {
        self.nodes
            .borrow_mut()
            .entry(slot.selector().to_owned())
            .or_default()
            .value = value.to_owned();
    }

    pub fn node(&self, target: impl Into<Target>) -> Node {
        self.nodes
            .borrow()
            .get(&target.into().selector())
            .cloned()
            .unwrap_or_default()
    }

    pub fn is_visible(&self, target: impl Into<Target>) -> bool {
        self.node(target).visible == Some(true)
    }

    pub fn has(&self, target: impl Into<Target>, class: &str) -> bool {
        self.node(target).classes.contains(class)
    }

    pub fn text(&self, slot: Slot) -> Option<String> {
        self.node(slot).text
    }

    pub fn html(&self, slot: Slot) -> String {
        self.node(slot).children.concat()
    }

    /// Number of mutating calls received.
    pub fn mutations(&self) -> usize {
        self.mutations.get()
    }

    /// Singular targets currently carrying `class`, among `group`'s members.
    pub fn with_class(&self, group: &Target, class: &str) -> Vec<Target> {
        self.expand(group)
            .into_iter()
            .filter(|t| self.has(t.clone(), class))
            .collect()
    }

    fn expand(&self, target: &Target) -> Vec<Target> {
        let mut members = target.members();
        if *target == Target::PopupPanels {
            let known: HashSet<String> = members.iter().map(Target::selector).collect();
            for key in self.nodes.borrow().keys() {
                if let Some(name) = key.strip_prefix("article.popup section.") {
                    if !known.contains(key) && name != "layer" {
                        members.push(Target::PopupPanel(crate::mode::PopupPanel::Other(
                            name.to_owned(),
                        )));
                    }
                }
            }
        }
        members
    }

    fn mutate<F>(&self, target: &Target, f: F) -> ViewResult
    where
        F: Fn(&mut Node),
    {
        self.mutations.set(self.mutations.get() + 1);
        for member in self.expand(target) {
            let key = member.selector();
            if self.missing.borrow().contains(&key) {
                if member.optional() || target.is_group() {
                    continue;
                }
                return Err(ViewError::MissingTarget(key));
            }
            f(self.nodes.borrow_mut().entry(key).or_default());
        }
        Ok(())
    }
}

impl Surface for RecordingSurface {
    fn set_visible(&self, target: &Target, visible: bool) -> ViewResult {
        self.mutate(target, |n| n.visible = Some(visible))
    }

    fn set_class(&self, target: &Target, class: &str, on: bool) -> ViewResult {
        self.mutate(target, |n| {
            if on {
                n.classes.insert(class.to_owned());
            } else {
                n.classes.remove(class);
            }
        })
    }

    fn has_class(&self, target: &Target, class: &str) -> bool {
        self.has(target.clone(), class)
    }

    fn contains(&self, target: &Target) -> bool {
        !self.missing.borrow().contains(&target.selector())
    }

    fn set_text(&self, slot: Slot, text: &str) -> ViewResult {
        self.mutate(&slot.into(), |n| n.text = Some(text.to_owned()))
    }

    fn replace_html(&self, slot: Slot, html: &str) -> ViewResult {
        self.mutate(&slot.into(), |n| {
            n.children.clear();
            if !html.is_empty() {
                n.children.push(html.to_owned());
            }
        })
    }

    fn append_html(&self, slot: Slot, html: &str) -> ViewResult {
        self.mutate(&slot.into(), |n| n.children.push(html.to_owned()))
    }

    fn child_count(&self, slot: Slot) -> usize {
        self.node(slot).children.len()
    }

    fn input_value(&self, slot: Slot) -> ViewResult<String> {
        let key = slot.selector();
        if self.missing.borrow().contains(key) {
            return Err(ViewError::MissingTarget(key.to_owned()));
        }
        Ok(self.node(slot).value.trim().to_owned())
    }
}

/// Holds every pause until [`GatePacer::release`] is called.
#[derive(Default)]
pub struct GatePacer {
    gate: Notify,
}

impl GatePacer {
    pub fn release(&self) {
        self.gate.notify_one();
    }
}

#[async_trait(?Send)]
impl Pacer for GatePacer {
    async fn pause(&self, _duration: Duration) {
        self.gate.notified().await;
    }
}

/// Wraps the in-memory node so single calls can be held back or failed.
///
/// A held call reads its answer immediately and only returns it after
/// [`HeldWalletApi::release`], so later calls can overtake it.
#[derive(Default)]
pub struct HeldWalletApi {
    pub inner: InMemoryWalletApi,
    hold_next: Cell<bool>,
    fail_seed: Cell<bool>,
    gate: Notify,
}

impl HeldWalletApi {
    pub fn hold_next(&self) {
        self.hold_next.set(true);
    }

    pub fn fail_seed(&self) {
        self.fail_seed.set(true);
    }

    pub fn release(&self) {
        self.gate.notify_one();
    }

    async fn answer<T>(&self, out: Result<T>) -> Result<T> {
        if self.hold_next.replace(false) {
            self.gate.notified().await;
        }
        out
    }
}

#[async_trait(?Send)]
impl WalletApi for HeldWalletApi {
    async fn create_seed(&self) -> Result<SeedResponse> {
        let out = if self.fail_seed.get() {
            Err(anyhow!("node down"))
        } else {
            self.inner.create_seed().await
        };
        self.answer(out).await
    }

    async fn create_account(&self) -> Result<AccountCreated> {
        let out = self.inner.create_account().await;
        self.answer(out).await
    }

    async fn get_account(&self, address: &AccountAddress) -> Result<AccountDetail> {
        let out = self.inner.get_account(address).await;
        self.answer(out).await
    }

    async fn get_account_transactions(
        &self,
        address: &AccountAddress,
    ) -> Result<Vec<TransactionRecord>> {
        let out = self.inner.get_account_transactions(address).await;
        self.answer(out).await
    }

    async fn send_bos(&self, req: &SendBosRequest) -> Result<SendBosReceipt> {
        let out = self.inner.send_bos(req).await;
        self.answer(out).await
    }
}
