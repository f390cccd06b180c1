//! Voting client
//!
//! [`VotingClient`] is the UI-independent core of the application. It owns the
//! session, the navigation context, the current screen's scope and view state,
//! and the banner shown after a failed service call. Every service call runs
//! inside the current screen's scope under the configured deadline, so leaving
//! the screen or cancelling through a [`ScopeCanceller`] discards its result.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};

use crate::config::settings::Settings;
use crate::models::election::{Candidate, Election, ElectionStatus, NewElection};
use crate::models::notification::Notification;
use crate::models::request::{ElectionRequest, ElectionRequestForm, RequestDecision, RequestReceipt, VoteReceipt};
use crate::models::user::{LoginRequest, RegisterRequest, User, UserRole};
use crate::repositories::{ElectionRepository, NotificationStore};
use crate::services::{ElectionFilter, ServiceFactory, TokenService};
use crate::state::{NavigationContext, NavigationController, ScopeCanceller, Screen, ScreenScope, SessionManager};
use crate::utils::errors::{ErrorSeverity, NavigationError, Result, UniVoteError};
use crate::utils::helpers::Clock;
use crate::utils::logging::{log_admin_action, log_navigation, log_service_error, log_user_action, log_vote_cast};
use crate::workflows::{Countdown, NotificationsView, RequestWorkflow, VoteWorkflow};

/// Dismissible error message tied to the screen the failed operation started on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub screen: Screen,
    pub message: String,
    pub severity: ErrorSeverity,
}

/// View state of the screen currently shown
#[derive(Debug, Default)]
pub enum ScreenView {
    #[default]
    Empty,
    Voting(VoteWorkflow),
    Notifications(NotificationsView),
    RequestElection(RequestWorkflow),
}

/// Returns the screen's workflow to editing when a submission future is dropped
/// before it settles, so the form never stays stuck in `Submitting`.
struct PendingSubmission<'a> {
    view: &'a mut ScreenView,
    operation: &'static str,
    settled: bool,
}

impl<'a> PendingSubmission<'a> {
    fn new(view: &'a mut ScreenView, operation: &'static str) -> Self {
        Self {
            view,
            operation,
            settled: false,
        }
    }

    /// The call finished; its outcome is recorded by the caller
    fn settle(mut self) {
        self.settled = true;
    }
}

impl Drop for PendingSubmission<'_> {
    fn drop(&mut self) {
        if self.settled {
            return;
        }

        let error = UniVoteError::Cancelled {
            operation: self.operation.to_string(),
        };
        match &mut *self.view {
            ScreenView::Voting(workflow) if workflow.is_submitting() => workflow.fail(&error),
            ScreenView::RequestElection(workflow) if workflow.is_submitting() => workflow.fail(&error),
            _ => return,
        }
        debug!(operation = self.operation, "Submission dropped before it settled");
    }
}

/// Election card on a dashboard
#[derive(Debug, Clone, Serialize)]
pub struct ElectionOverview {
    pub election: Election,
    /// Current leader, or the winner once completed
    pub leader: Option<Candidate>,
    /// Turnout towards the participation target, capped at 100
    pub participation: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary {
    pub role: UserRole,
    pub active: Vec<ElectionOverview>,
    pub completed: Vec<ElectionOverview>,
    pub pending: Vec<ElectionOverview>,
    pub unread_notifications: usize,
    /// Admin approval queue; empty for students
    pub pending_requests: Vec<ElectionRequest>,
    pub total_votes: u64,
}

pub struct VotingClient {
    settings: Settings,
    clock: Arc<dyn Clock>,
    services: ServiceFactory,
    session: SessionManager,
    navigator: NavigationController,
    context: NavigationContext,
    scope: ScreenScope,
    view: ScreenView,
    banner: Option<Banner>,
}

impl std::fmt::Debug for VotingClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VotingClient")
            .field("context", &self.context.summary())
            .field("session", &self.session)
            .field("banner", &self.banner)
            .finish_non_exhaustive()
    }
}

impl VotingClient {
    pub fn new(settings: Settings, services: ServiceFactory, clock: Arc<dyn Clock>) -> Self {
        let session = SessionManager::new(services.auth_service.clone(), TokenService::new(&settings.auth));

        Self {
            context: NavigationContext::new(clock.now()),
            scope: ScreenScope::new(Screen::Auth),
            view: ScreenView::Empty,
            navigator: NavigationController::new(),
            banner: None,
            session,
            services,
            settings,
            clock,
        }
    }

    /// Client wired to the in-memory services and demo data
    pub fn in_memory(settings: Settings, clock: Arc<dyn Clock>) -> Self {
        let services = ServiceFactory::in_memory(&settings, clock.clone());
        Self::new(settings, services, clock)
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn current_screen(&self) -> Screen {
        self.context.current
    }

    pub fn context(&self) -> &NavigationContext {
        &self.context
    }

    pub fn current_user(&self) -> Option<&User> {
        self.session.current_user()
    }

    pub fn banner(&self) -> Option<&Banner> {
        self.banner.as_ref()
    }

    pub fn dismiss_banner(&mut self) {
        self.banner = None;
    }

    /// Cancels whatever the current screen has in flight
    pub fn canceller(&self) -> ScopeCanceller {
        self.scope.canceller()
    }

    pub fn view(&self) -> &ScreenView {
        &self.view
    }

    pub fn universities(&self) -> &[String] {
        &self.settings.app.universities
    }

    pub fn registration_departments(&self) -> &[String] {
        &self.settings.app.registration_departments
    }

    pub fn election_departments(&self) -> &[String] {
        &self.settings.app.election_departments
    }

    // Session

    pub async fn login(&mut self, username: &str, password: &str) -> Result<User> {
        let request = LoginRequest::new(username, password);
        let now = self.clock.now();
        let deadline = self.settings.timing.service_timeout();

        let session = &mut self.session;
        let outcome = self
            .scope
            .run("login", deadline, async move {
                session.login(&request, now).await.cloned()
            })
            .await;

        self.enter_dashboard(outcome, "login")
    }

    pub async fn register(&mut self, request: RegisterRequest) -> Result<User> {
        let now = self.clock.now();
        let deadline = self.settings.timing.service_timeout();

        let session = &mut self.session;
        let outcome = self
            .scope
            .run("register", deadline, async move {
                session.register(&request, now).await.cloned()
            })
            .await;

        self.enter_dashboard(outcome, "register")
    }

    fn enter_dashboard(&mut self, outcome: Result<User>, action: &str) -> Result<User> {
        let user = outcome.map_err(|e| self.surface(e, "auth"))?;
        log_user_action(&user.id, action, Some(user.role.as_str()));

        self.navigate(Screen::dashboard_for(user.role), None)?;
        Ok(user)
    }

    /// End the session and return to the auth screen. Always succeeds.
    pub fn logout(&mut self) {
        if let Some(session) = self.session.logout() {
            log_user_action(&session.user.id, "logout", None);
        }
        self.banner = None;

        let from = self.context.current;
        self.context = NavigationContext::new(self.clock.now());
        self.replace_scope(Screen::Auth);
        log_navigation(None, from.as_str(), Screen::Auth.as_str());
    }

    // Navigation

    /// Move to `screen`, optionally selecting an election for the voting screen.
    ///
    /// On success the previous screen's scope is closed, which aborts its in-flight
    /// calls and periodic tasks, and fresh view state is created for the new screen.
    /// The voting countdown runs on the current tokio runtime; called outside one,
    /// the voting screen opens with a countdown that is not refreshed.
    pub fn navigate(&mut self, screen: Screen, election: Option<Election>) -> Result<()> {
        if screen == Screen::Auth {
            self.logout();
            return Ok(());
        }

        let from = self.context.current;
        let now = self.clock.now();
        self.navigator
            .navigate(&mut self.context, self.session.role(), screen, election, now)?;

        self.replace_scope(screen);
        self.view = self.build_view(screen);
        if self.banner.as_ref().map_or(false, |b| b.screen != screen) {
            self.banner = None;
        }

        let user_id = self.session.current_user().map(|u| u.id.clone());
        log_navigation(user_id.as_deref(), from.as_str(), screen.as_str());
        debug!(context = %self.context.summary(), "Navigation context updated");
        Ok(())
    }

    /// Back to the signed-in user's dashboard
    pub fn go_home(&mut self) -> Result<()> {
        let role = self.session.role().ok_or(NavigationError::NotAuthenticated)?;
        self.navigate(Screen::dashboard_for(role), None)
    }

    /// Fetch the latest record of an election and open it on the voting screen
    pub async fn open_election(&mut self, election_id: &str) -> Result<()> {
        let deadline = self.settings.timing.service_timeout();
        let outcome = self
            .scope
            .run("load election", deadline, self.services.election_service.get_election(election_id))
            .await;

        let election = outcome.map_err(|e| self.surface(e, "elections"))?;
        self.navigate(Screen::Voting, Some(election))
    }

    fn replace_scope(&mut self, screen: Screen) {
        let mut previous = std::mem::replace(&mut self.scope, ScreenScope::new(screen));
        previous.close();
        self.view = ScreenView::Empty;
    }

    fn build_view(&mut self, screen: Screen) -> ScreenView {
        match screen {
            Screen::Voting => match self.context.selected_election.clone() {
                Some(election) => {
                    let end_date = election.end_date;
                    let mut workflow = VoteWorkflow::new(election);
                    workflow.attach_countdown(Countdown::start(
                        &mut self.scope,
                        self.clock.clone(),
                        end_date,
                        self.settings.timing.countdown_refresh(),
                    ));
                    ScreenView::Voting(workflow)
                }
                None => ScreenView::Empty,
            },
            Screen::Notifications => ScreenView::Notifications(NotificationsView::new()),
            Screen::RequestElection => match self.session.current_user() {
                Some(user) => ScreenView::RequestElection(RequestWorkflow::new(ElectionRequestForm::for_requester(
                    &user.university,
                    &user.department,
                    self.clock.today(),
                ))),
                None => ScreenView::Empty,
            },
            Screen::Auth | Screen::StudentDashboard | Screen::AdminDashboard => ScreenView::Empty,
        }
    }

    // Dashboards

    pub async fn dashboard(&mut self) -> Result<DashboardSummary> {
        let user = self.session.require_user()?.clone();
        let deadline = self.settings.timing.service_timeout();
        let services = &self.services;

        let outcome = self
            .scope
            .run("load dashboard", deadline, async {
                let elections = services.election_service.list_elections(ElectionFilter::all()).await?;
                let notifications = services.notification_service.list_notifications(&user.id).await?;
                let requests = if user.role.is_admin() {
                    services.election_service.list_pending_requests().await?
                } else {
                    Vec::new()
                };
                Ok::<_, UniVoteError>((elections, notifications, requests))
            })
            .await;

        let (elections, notifications, pending_requests) = outcome.map_err(|e| self.surface(e, "elections"))?;
        let repository = ElectionRepository::from_elections(elections);
        let target = self.settings.app.participation_target;
        let overview = |status: ElectionStatus| -> Vec<ElectionOverview> {
            repository
                .list_by_status(status)
                .into_iter()
                .map(|election| ElectionOverview {
                    leader: election.leading_candidate().cloned(),
                    participation: election.participation_progress(target),
                    election: election.clone(),
                })
                .collect()
        };

        Ok(DashboardSummary {
            role: user.role,
            active: overview(ElectionStatus::Active),
            completed: overview(ElectionStatus::Completed),
            pending: overview(ElectionStatus::Pending),
            unread_notifications: NotificationStore::new(notifications).unread_count(),
            pending_requests,
            total_votes: repository.sum_total_votes(),
        })
    }

    // Voting screen

    pub fn vote_workflow(&self) -> Option<&VoteWorkflow> {
        match &self.view {
            ScreenView::Voting(workflow) => Some(workflow),
            _ => None,
        }
    }

    fn vote_workflow_mut(&mut self) -> Result<&mut VoteWorkflow> {
        match &mut self.view {
            ScreenView::Voting(workflow) => Ok(workflow),
            _ => Err(NavigationError::NotOnScreen {
                expected: Screen::Voting.to_string(),
            }
            .into()),
        }
    }

    pub fn select_candidate(&mut self, candidate_id: &str) -> Result<()> {
        self.vote_workflow_mut()?.select_candidate(candidate_id)
    }

    /// Submit the selected candidate.
    ///
    /// No selection or a closed election is refused locally. A service failure,
    /// timeout or cancellation returns the ballot to `Selecting`.
    pub async fn submit_vote(&mut self) -> Result<VoteReceipt> {
        let user_id = self.session.require_user()?.id.clone();
        let now = self.clock.now();
        let deadline = self.settings.timing.service_timeout();

        let workflow = self.vote_workflow_mut()?;
        let candidate_id = workflow.begin_submit(now)?;
        let election_id = workflow.election().id.clone();

        let pending = PendingSubmission::new(&mut self.view, "cast vote");
        let outcome = self
            .scope
            .run(
                "cast vote",
                deadline,
                self.services
                    .election_service
                    .cast_vote(&election_id, &candidate_id, &user_id),
            )
            .await;
        pending.settle();

        match outcome {
            Ok(receipt) => {
                log_vote_cast(&user_id, &election_id);
                self.vote_workflow_mut()?.complete(receipt.clone());
                Ok(receipt)
            }
            Err(error) => {
                self.vote_workflow_mut()?.fail(&error);
                Err(self.surface(error, "elections"))
            }
        }
    }

    // Request form screen

    pub fn request_workflow(&self) -> Option<&RequestWorkflow> {
        match &self.view {
            ScreenView::RequestElection(workflow) => Some(workflow),
            _ => None,
        }
    }

    /// Editable request form of the current screen
    pub fn request_workflow_mut(&mut self) -> Result<&mut RequestWorkflow> {
        match &mut self.view {
            ScreenView::RequestElection(workflow) => Ok(workflow),
            _ => Err(NavigationError::NotOnScreen {
                expected: Screen::RequestElection.to_string(),
            }
            .into()),
        }
    }

    /// Validate the form and queue it for admin approval
    pub async fn submit_request(&mut self) -> Result<RequestReceipt> {
        let user = self.session.require_user()?.clone();
        let today = self.clock.today();
        let deadline = self.settings.timing.service_timeout();

        let departments = &self.settings.app.election_departments;
        let workflow = match &mut self.view {
            ScreenView::RequestElection(workflow) => workflow,
            _ => {
                return Err(NavigationError::NotOnScreen {
                    expected: Screen::RequestElection.to_string(),
                }
                .into())
            }
        };
        let form = workflow.begin_submit(today, departments)?;

        let pending = PendingSubmission::new(&mut self.view, "request election");
        let outcome = self
            .scope
            .run(
                "request election",
                deadline,
                self.services.election_service.request_election(&form, &user),
            )
            .await;
        pending.settle();

        match outcome {
            Ok(receipt) => {
                log_user_action(&user.id, "request_election", Some(&receipt.request_id));
                self.request_workflow_mut()?.complete(receipt.clone());
                Ok(receipt)
            }
            Err(error) => {
                self.request_workflow_mut()?.fail(&error);
                Err(self.surface(error, "elections"))
            }
        }
    }

    // Notifications screen

    pub fn notifications_view(&self) -> Option<&NotificationsView> {
        match &self.view {
            ScreenView::Notifications(view) => Some(view),
            _ => None,
        }
    }

    /// Filter and selection of the current notifications screen
    pub fn notifications_view_mut(&mut self) -> Result<&mut NotificationsView> {
        match &mut self.view {
            ScreenView::Notifications(view) => Ok(view),
            _ => Err(NavigationError::NotOnScreen {
                expected: Screen::Notifications.to_string(),
            }
            .into()),
        }
    }

    /// Feed passing the screen's current filter
    pub async fn notifications(&mut self) -> Result<Vec<Notification>> {
        let user_id = self.session.require_user()?.id.clone();
        let filter = self.notifications_view_mut()?.filter();
        let deadline = self.settings.timing.service_timeout();

        let outcome = self
            .scope
            .run(
                "load notifications",
                deadline,
                self.services.notification_service.list_notifications(&user_id),
            )
            .await;

        let feed = outcome.map_err(|e| self.surface(e, "notifications"))?;
        Ok(feed.into_iter().filter(|n| filter.matches(n)).collect())
    }

    /// Mark the selected notifications read; the selection is cleared afterwards.
    /// Returns how many ids were sent.
    pub async fn mark_selected_read(&mut self) -> Result<usize> {
        let selection = self.notifications_view_mut()?.take_selection();
        if selection.is_empty() {
            return Ok(0);
        }
        let deadline = self.settings.timing.service_timeout();

        let outcome = self
            .scope
            .run(
                "mark notifications read",
                deadline,
                self.services.notification_service.mark_read(&selection),
            )
            .await;

        match outcome {
            Ok(()) => Ok(selection.len()),
            Err(error) => {
                // Keep the selection so the user can retry.
                if let Ok(view) = self.notifications_view_mut() {
                    for id in &selection {
                        view.toggle(id);
                    }
                }
                Err(self.surface(error, "notifications"))
            }
        }
    }

    // Admin actions

    fn require_admin(&self) -> Result<User> {
        let user = self.session.require_user()?;
        if !user.role.is_admin() {
            return Err(UniVoteError::PermissionDenied(format!(
                "{} is not an administrator",
                user.username
            )));
        }
        Ok(user.clone())
    }

    pub async fn pending_requests(&mut self) -> Result<Vec<ElectionRequest>> {
        self.require_admin()?;
        let deadline = self.settings.timing.service_timeout();

        let outcome = self
            .scope
            .run(
                "load requests",
                deadline,
                self.services.election_service.list_pending_requests(),
            )
            .await;
        outcome.map_err(|e| self.surface(e, "elections"))
    }

    pub async fn resolve_request(&mut self, request_id: &str, decision: RequestDecision) -> Result<()> {
        let admin = self.require_admin()?;
        let deadline = self.settings.timing.service_timeout();

        let outcome = self
            .scope
            .run(
                "resolve request",
                deadline,
                self.services.election_service.resolve_request(request_id, decision),
            )
            .await;
        outcome.map_err(|e| self.surface(e, "elections"))?;

        let action = match decision {
            RequestDecision::Approve => "approve_request",
            RequestDecision::Reject => "reject_request",
        };
        log_admin_action(&admin.id, action, Some(request_id), None);
        Ok(())
    }

    pub async fn create_election(&mut self, election: NewElection) -> Result<Election> {
        let admin = self.require_admin()?;
        let election = election.validated()?;
        let deadline = self.settings.timing.service_timeout();

        let outcome = self
            .scope
            .run(
                "create election",
                deadline,
                self.services.election_service.create_election(election),
            )
            .await;

        let created = outcome.map_err(|e| self.surface(e, "elections"))?;
        log_admin_action(&admin.id, "create_election", Some(&created.id), Some(&created.name));
        Ok(created)
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Record a failed service call as a banner on the current screen.
    /// Cancellations and form-level errors are returned without a banner.
    fn surface(&mut self, error: UniVoteError, service: &str) -> UniVoteError {
        if matches!(error, UniVoteError::Cancelled { .. }) || error.is_field_level() {
            return error;
        }

        let screen = self.context.current;
        log_service_error(service, &error.to_string(), Some(screen.as_str()));
        info!(screen = %screen, severity = %error.severity(), "Showing error banner");
        self.banner = Some(Banner {
            screen,
            message: error.user_message(),
            severity: error.severity(),
        });
        error
    }
}
