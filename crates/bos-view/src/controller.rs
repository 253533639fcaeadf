//! The wallet view controller.
//!
//! Translates UI intent into section/class toggles on the [`Surface`] and
//! calls into the injected [`WalletApi`], rendering whatever comes back.
//! One controller owns all UI state for the lifetime of the page.

use std::cell::RefCell;
use std::rc::Rc;

use bos_api_types::{
    AccountAddress, AccountDetail, InboundEvent, ReceiveNotification, SendBosRequest,
};
use bos_wallet_client::WalletApi;
use futures::future;
use tracing::{debug, info, warn};

use crate::error::{ViewError, ViewResult};
use crate::mode::{LayoutMode, LoginMode, PopupMode, PopupPanel, ToggleMenu};
use crate::pacing::{Pacer, ViewConfig};
use crate::render;
use crate::state::UiState;
use crate::surface::{FREEZING, ON, Region, Slot, Surface, Target};

/// User intents raised by the page's click handlers and push transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    LoginLink(LoginMode),
    CloseToDash,
    OpenConfig,
    AddAccount,
    OpenBlockInfo,
    OpenAccount,
    QuickReceive,
    QuickSend,
    QuickFreeze,
    AskFreeze,
    AskSend,
    AskCancelSend,
    ToggleHeader(usize),
    ConfigHeader(usize),
    ClosePopup,
    ConfirmFreeze,
    ConfirmUnfreeze,
    ConfirmSend,
    Receive(InboundEvent),
}

pub struct ViewController<S> {
    surface: S,
    api: Rc<dyn WalletApi>,
    pacer: Rc<dyn Pacer>,
    config: ViewConfig,
    state: RefCell<UiState>,
}

impl<S: Surface> ViewController<S> {
    pub fn new(
        surface: S,
        api: Rc<dyn WalletApi>,
        pacer: Rc<dyn Pacer>,
        config: ViewConfig,
    ) -> Self {
        Self {
            surface,
            api,
            pacer,
            config,
            state: RefCell::new(UiState::default()),
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Snapshot of the current UI state.
    pub fn state(&self) -> UiState {
        self.state.borrow().clone()
    }

    pub async fn initialize(&self) -> ViewResult {
        self.set_login_mode(LoginMode::Start).await
    }

    /// Run one user intent, logging and displaying any failure.
    pub async fn dispatch(&self, action: Action) {
        debug!(?action, "dispatch");
        let result = match action {
            Action::LoginLink(mode) => self.set_login_mode(mode).await,
            Action::CloseToDash => self.set_layout(LayoutMode::Dash).await,
            Action::OpenConfig => self.set_layout(LayoutMode::Config).await,
            Action::AddAccount => self.add_account().await,
            Action::OpenBlockInfo => self.set_layout(LayoutMode::Block).await,
            Action::OpenAccount => self.open_account(ToggleMenu::Init).await,
            Action::QuickReceive => self.open_account(ToggleMenu::Receive).await,
            Action::QuickSend => self.open_account(ToggleMenu::Send).await,
            Action::QuickFreeze => self.quick_freeze().await,
            Action::AskFreeze => self.set_popup(&PopupMode::Show(PopupPanel::Freezing)),
            Action::AskSend => self.set_popup(&PopupMode::Show(PopupPanel::SendBos)),
            Action::AskCancelSend => {
                self.set_popup(&PopupMode::Show(PopupPanel::SendBosCancel))
            }
            Action::ToggleHeader(index) => self.toggle_header(index).await,
            Action::ConfigHeader(index) => self.config_header(index),
            Action::ClosePopup => self.set_popup(&PopupMode::Close),
            Action::ConfirmFreeze => self.set_freezing(true),
            Action::ConfirmUnfreeze => self.set_freezing(false),
            Action::ConfirmSend => self.confirm_send().await,
            Action::Receive(event) => self.receive_bos(&event),
        };
        match result {
            Ok(()) => self.clear_error(),
            Err(err) => self.report_error(&err),
        }
    }

    // ── Onboarding ──

    pub async fn set_login_mode(&self, mode: LoginMode) -> ViewResult {
        let epoch = self.state.borrow_mut().next_login_epoch();
        info!(mode = mode.class(), "login mode");
        self.activate_login_section(mode)?;

        match mode {
            LoginMode::Start => {
                self.surface.set_visible(&Region::Onboarding.into(), true)?;
                self.surface.set_visible(&Region::Main.into(), false)?;
            }
            LoginMode::Create => {
                let (seed, ()) = future::join(
                    self.api.create_seed(),
                    self.pacer.pause(self.config.create_delay),
                )
                .await;
                if !self.login_is_current(epoch) {
                    return Ok(());
                }
                let seed = seed?;
                self.activate_login_section(LoginMode::Phrase)?;
                self.render_phrase(seed.words())?;
            }
            LoginMode::Phrase => {
                let seed = self.api.create_seed().await;
                if !self.login_is_current(epoch) {
                    return Ok(());
                }
                self.render_phrase(seed?.words())?;
            }
            LoginMode::Check => self.render_check()?,
            LoginMode::Loading => {
                self.pacer.pause(self.config.loading_delay).await;
                if !self.login_is_current(epoch) {
                    return Ok(());
                }
                self.surface.set_visible(&Region::Onboarding.into(), false)?;
                self.surface.set_visible(&Region::Main.into(), true)?;
                self.set_layout(LayoutMode::Dash).await?;
            }
        }
        Ok(())
    }

    fn activate_login_section(&self, mode: LoginMode) -> ViewResult {
        self.surface.set_class(&Target::LoginSections, ON, false)?;
        self.surface.set_class(&Target::LoginSection(mode), ON, true)
    }

    fn login_is_current(&self, epoch: u64) -> bool {
        let current = self.state.borrow().epochs.login == epoch;
        if !current {
            debug!(epoch, "login transition superseded");
        }
        current
    }

    fn render_phrase(&self, words: Vec<String>) -> ViewResult {
        self.surface
            .replace_html(Slot::PhraseList, &render::phrase_items(&words))?;
        self.state.borrow_mut().passphrase = words;
        Ok(())
    }

    // The re-entered words are not compared against the passphrase.
    fn render_check(&self) -> ViewResult {
        let count = self.state.borrow().passphrase.len();
        self.surface
            .replace_html(Slot::CheckInputs, &render::check_inputs(count))
    }

    // ── Main layout ──

    pub async fn set_layout(&self, mode: LayoutMode) -> ViewResult {
        info!(mode = mode.name(), "layout");
        self.surface.set_class(&Target::LayoutSections, ON, false)?;
        self.surface.set_class(&Target::LayoutSection(mode), ON, true)?;

        match mode {
            LayoutMode::Dash => {
                let needs_account = self.surface.child_count(Slot::AccountCards) == 0
                    && !self.state.borrow().bootstrapping_dash;
                if needs_account {
                    self.state.borrow_mut().bootstrapping_dash = true;
                    let result = self.bootstrap_dash().await;
                    self.state.borrow_mut().bootstrapping_dash = false;
                    result?;
                }
            }
            LayoutMode::Account => self.refresh_account().await?,
            LayoutMode::Block | LayoutMode::Config => {}
        }
        Ok(())
    }

    async fn bootstrap_dash(&self) -> ViewResult {
        let created = self.api.create_account().await?;
        let address = created.account_address;
        self.state
            .borrow_mut()
            .set_current_account(address.clone());
        self.add_count(&address)?;

        let detail = self.api.get_account(&address).await?;
        self.surface
            .set_text(Slot::DashAddress, detail.account_address.as_str())?;
        self.surface
            .replace_html(Slot::DashCoin, &render::coin(&detail.account_balance))
    }

    async fn refresh_account(&self) -> ViewResult {
        let (epoch, address) = {
            let mut state = self.state.borrow_mut();
            (state.next_account_epoch(), state.current_account.clone())
        };
        let address = address.ok_or(ViewError::NoCurrentAccount)?;
        let detail = self.api.get_account(&address).await?;
        if self.state.borrow().epochs.account != epoch {
            debug!(%address, "stale account response dropped");
            return Ok(());
        }
        self.render_account(detail)
    }

    fn render_account(&self, detail: AccountDetail) -> ViewResult {
        self.surface
            .set_text(Slot::AccountAddress, detail.account_address.as_str())?;
        self.surface
            .set_text(Slot::AccountBalance, &detail.account_balance)?;
        self.surface
            .set_text(Slot::AvailableBalance, &detail.available_balance)?;
        self.surface
            .set_text(Slot::PendingBalance, &detail.pending_balance)?;
        self.surface.set_class(
            &Slot::FreezingControl.into(),
            FREEZING,
            !detail.freezing_status,
        )?;
        self.state
            .borrow_mut()
            .set_current_account(detail.account_address);
        Ok(())
    }

    async fn open_account(&self, menu: ToggleMenu) -> ViewResult {
        self.set_layout(LayoutMode::Account).await?;
        self.set_toggle_menu(menu).await
    }

    async fn quick_freeze(&self) -> ViewResult {
        self.set_layout(LayoutMode::Account).await?;
        self.set_popup(&PopupMode::Show(PopupPanel::UnFreezing))
    }

    /// Create another account and append its card to the dashboard.
    pub async fn add_account(&self) -> ViewResult {
        let created = self.api.create_account().await?;
        info!(address = %created.account_address, "account created");
        self.state
            .borrow_mut()
            .set_current_account(created.account_address.clone());
        self.add_count(&created.account_address)
    }

    pub fn add_count(&self, address: &AccountAddress) -> ViewResult {
        self.surface
            .append_html(Slot::AccountCards, &render::account_card(address))
    }

    // ── Popup layer ──

    pub fn set_popup(&self, mode: &PopupMode) -> ViewResult {
        debug!(%mode, "popup");
        let popup = Target::Region(Region::Popup);
        match mode {
            PopupMode::Close => {
                self.surface.set_class(&popup, ON, false)?;
                self.surface.set_visible(&Target::PopupPanels, false)
            }
            PopupMode::Show(panel) => {
                self.surface.set_visible(&Target::PopupPanels, false)?;
                // The layer never stays open without a panel on it.
                if let Err(err) = self
                    .surface
                    .set_visible(&Target::PopupPanel(panel.clone()), true)
                {
                    self.surface.set_class(&popup, ON, false)?;
                    return Err(err);
                }
                self.surface.set_class(&popup, ON, true)
            }
        }
    }

    fn set_freezing(&self, frozen: bool) -> ViewResult {
        self.set_popup(&PopupMode::Close)?;
        self.surface
            .set_class(&Slot::FreezingControl.into(), FREEZING, frozen)
    }

    // ── Account toggles ──

    pub async fn set_toggle_menu(&self, menu: ToggleMenu) -> ViewResult {
        debug!(menu = menu.name(), "toggle menu");
        self.surface.set_class(&Target::ToggleEntries, ON, false)?;
        let Some(index) = menu.index() else {
            return Ok(());
        };
        self.surface
            .set_class(&Target::ToggleEntry(index), ON, true)?;
        if menu == ToggleMenu::Transaction {
            self.load_transactions().await?;
        }
        Ok(())
    }

    async fn load_transactions(&self) -> ViewResult {
        let (epoch, address) = {
            let mut state = self.state.borrow_mut();
            (state.next_transactions_epoch(), state.current_account.clone())
        };
        let address = address.ok_or(ViewError::NoCurrentAccount)?;
        let records = self.api.get_account_transactions(&address).await?;
        if self.state.borrow().epochs.transactions != epoch {
            debug!(%address, "stale transaction list dropped");
            return Ok(());
        }
        debug!(count = records.len(), "rendering transactions");
        self.surface
            .replace_html(Slot::TransactionRows, &render::transaction_rows(&records))
    }

    async fn toggle_header(&self, index: usize) -> ViewResult {
        let entry = Target::ToggleEntry(index);
        if self.surface.has_class(&entry, ON) {
            return self.surface.set_class(&entry, ON, false);
        }
        self.set_toggle_menu(ToggleMenu::from_index(index)?).await
    }

    fn config_header(&self, index: usize) -> ViewResult {
        let entry = Target::ConfigEntry(index);
        let open = !self.surface.has_class(&entry, ON);
        self.surface.set_class(&entry, ON, open)
    }

    // ── Sending ──

    async fn confirm_send(&self) -> ViewResult {
        let sender = self
            .state
            .borrow()
            .current_account
            .clone()
            .ok_or(ViewError::NoCurrentAccount)?;
        let request = build_send_request(
            sender,
            self.surface.input_value(Slot::SendReceiver)?,
            self.surface.input_value(Slot::SendAmount)?,
            self.surface.input_value(Slot::SendMemo)?,
        )?;

        self.set_popup(&PopupMode::Show(PopupPanel::SendBosOk))?;
        info!(param = %request.to_param_string(), "sending BOS");
        let receipt = self.api.send_bos(&request).await?;
        info!(%receipt, "send BOS result");
        Ok(())
    }

    // ── Push notifications ──

    pub fn receive_bos(&self, event: &InboundEvent) -> ViewResult {
        if !event.trusted {
            debug!("ignoring untrusted notification");
            return Ok(());
        }
        let notification = ReceiveNotification::decode(&event.data)?;
        info!(
            receiver = %notification.receiver,
            amount = %notification.amount,
            "BOS received"
        );

        let unread = {
            let mut state = self.state.borrow_mut();
            state.last_notification = Some(notification.fields.clone());
            state.unread_receipts += 1;
            state.unread_receipts
        };
        self.add_receive_bos(&notification)?;

        if !self.surface.contains(&Slot::AccountReceiveBadge.into()) {
            self.surface
                .append_html(Slot::AccountReceiveHeader, &render::badge(unread))?;
        }
        let badge = unread.to_string();
        for slot in [Slot::DashReceiveBadge, Slot::AccountReceiveBadge] {
            self.surface.set_text(slot, &badge)?;
            self.surface.set_class(&slot.into(), ON, true)?;
        }
        Ok(())
    }

    pub fn add_receive_bos(&self, notification: &ReceiveNotification) -> ViewResult {
        self.surface
            .append_html(Slot::ReceiveRows, &render::receive_row(&notification.amount))
    }

    // ── Error state ──

    fn report_error(&self, err: &ViewError) {
        warn!(error = %err, "wallet view action failed");
        let message = err.to_string();
        if let Err(banner) = self.show_banner(&message, true) {
            debug!(error = %banner, "error banner not updated");
        }
        self.state.borrow_mut().last_error = Some(message);
    }

    fn clear_error(&self) {
        if self.state.borrow_mut().last_error.take().is_none() {
            return;
        }
        if let Err(banner) = self.show_banner("", false) {
            debug!(error = %banner, "error banner not cleared");
        }
    }

    fn show_banner(&self, message: &str, on: bool) -> ViewResult {
        self.surface.set_text(Slot::ErrorBanner, message)?;
        self.surface.set_class(&Slot::ErrorBanner.into(), ON, on)
    }
}

fn build_send_request(
    sender: AccountAddress,
    receiver: String,
    amount: String,
    memo: String,
) -> ViewResult<SendBosRequest> {
    if receiver.is_empty() {
        return Err(ViewError::InvalidSend("receiver address is required"));
    }
    if !amount.parse::<f64>().is_ok_and(|v| v.is_finite() && v > 0.0) {
        return Err(ViewError::InvalidSend("amount must be a positive number"));
    }
    if [receiver.as_str(), amount.as_str(), memo.as_str()]
        .iter()
        .any(|part| part.contains('/'))
    {
        return Err(ViewError::InvalidSend("fields must not contain '/'"));
    }
    Ok(SendBosRequest {
        sender,
        receiver: AccountAddress(receiver),
        amount,
        memo,
    })
}
