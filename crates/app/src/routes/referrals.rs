use dioxus::prelude::*;
use shared_types::{AppError, ListState, ReferralProgram, ReferralRecord, ReferralSettings, ViewState};
use shared_ui::{
    use_toast, Button, Card, CardContent, CardHeader, DataTable, DataTableBody, DataTableCell,
    DataTableColumn, DataTableEmpty, DataTableHeader, DataTableRow, EmptyState, Input,
    PageHeader, SkeletonRows, StatCard, StatGrid, StatusBadge,
};

use crate::auth::use_api;
use crate::feedback;
use crate::format_helpers::{format_count, format_currency, format_date, format_optional_currency, format_percent};

/// Settings form text. Parsed on save so the request builder sees numbers.
#[derive(Debug, Clone, PartialEq)]
struct SettingsDraft {
    reward_amount: String,
    expiration_days: String,
}

impl Default for SettingsDraft {
    fn default() -> Self {
        let defaults = ReferralSettings::default();
        Self {
            reward_amount: defaults.reward_amount.to_string(),
            expiration_days: defaults.expiration_days.to_string(),
        }
    }
}

impl SettingsDraft {
    fn to_settings(&self) -> Result<ReferralSettings, AppError> {
        let reward_amount = self
            .reward_amount
            .trim()
            .parse::<f64>()
            .map_err(|_| AppError::validation_field("reward_amount", "Enter a valid reward amount"))?;
        let expiration_days = self
            .expiration_days
            .trim()
            .parse::<u32>()
            .map_err(|_| AppError::validation_field("expiration_days", "Enter a whole number of days"))?;
        ReferralSettings {
            reward_amount,
            expiration_days,
        }
        .validated()
    }
}

/// Referral program stats, settings and tracking.
#[component]
pub fn Referrals() -> Element {
    let api = use_api();
    let toast = use_toast();

    let mut program = use_signal(ViewState::<ReferralProgram>::default);
    let mut tracking = use_signal(ListState::<ReferralRecord>::default);
    let mut draft = use_signal(SettingsDraft::default);
    let mut saving = use_signal(|| false);

    let _program = use_resource({
        let api = api.clone();
        move || {
            let api = api.clone();
            async move {
                program.write().begin();
                let result = api.referral_program().await;
                if let Some(err) = program.write().finish(result) {
                    feedback::failure(toast, &err, "Failed to load referral program");
                }
            }
        }
    });

    let _tracking = use_resource({
        let api = api.clone();
        move || {
            let api = api.clone();
            async move {
                tracking.write().begin();
                let result = api.referral_tracking().await;
                if let Some(err) = tracking.write().finish(result) {
                    feedback::failure(toast, &err, "Failed to load referrals");
                }
            }
        }
    });

    let save = {
        let api = api.clone();
        move |_: MouseEvent| {
            let api = api.clone();
            spawn(async move {
                saving.set(true);
                let result = match draft.read().to_settings() {
                    Ok(settings) => api.update_referral_settings(&settings).await,
                    Err(e) => Err(e),
                };
                match result {
                    Ok(()) => feedback::success(toast, "Referral settings saved"),
                    Err(e) => feedback::failure(toast, &e, "Failed to save referral settings"),
                }
                saving.set(false);
            });
        }
    };

    let state = tracking.read();
    let tracking_loading = state.is_initial_load();
    let records = state.items().to_vec();
    drop(state);
    let d = draft();

    rsx! {
        PageHeader {
            title: "Referrals",
            description: "Program performance and reward rules",
        }

        match &*program.read() {
            ViewState::Loading => rsx! { SkeletonRows { count: 3 } },
            ViewState::Empty => rsx! { EmptyState { message: "The referral program has no data yet." } },
            ViewState::Loaded(data) => rsx! { ProgramPanels { program: data.clone() } },
        }

        Card {
            CardHeader { title: "Program settings", description: "Applies to new referral links" }
            CardContent {
                div { class: "filter-grid",
                    Input {
                        label: "Reward amount",
                        input_type: "number",
                        required: true,
                        value: d.reward_amount.clone(),
                        on_input: move |e: FormEvent| draft.write().reward_amount = e.value(),
                    }
                    Input {
                        label: "Link expiration (days)",
                        input_type: "number",
                        required: true,
                        value: d.expiration_days.clone(),
                        on_input: move |e: FormEvent| draft.write().expiration_days = e.value(),
                    }
                }
                div { class: "filter-actions",
                    Button { loading: saving(), loading_text: "Saving...", onclick: save, "Save settings" }
                }
            }
        }

        Card {
            CardHeader { title: "Referral tracking" }
            CardContent {
                if tracking_loading {
                    SkeletonRows {}
                } else {
                    DataTable {
                        DataTableHeader {
                            DataTableColumn { "Referrer" }
                            DataTableColumn { "Referred user" }
                            DataTableColumn { "Status" }
                            DataTableColumn { align_end: true, "Reward" }
                            DataTableColumn { "Date" }
                        }
                        DataTableBody {
                            if records.is_empty() {
                                DataTableEmpty { colspan: 5, message: "No referrals recorded." }
                            }
                            for record in records {
                                DataTableRow { key: "{record.id}",
                                    DataTableCell { {record.referrer_label().to_string()} }
                                    DataTableCell { {record.referred_label().to_string()} }
                                    DataTableCell { StatusBadge { status: record.status.clone() } }
                                    DataTableCell { align_end: true, {format_optional_currency(record.reward_amount)} }
                                    DataTableCell { {format_date(record.created_at.as_ref())} }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn ProgramPanels(program: ReferralProgram) -> Element {
    rsx! {
        StatGrid {
            StatCard { label: "Total referrals", value: format_count(program.total_referrals) }
            StatCard { label: "Active campaigns", value: format_count(program.active_campaigns) }
            StatCard { label: "Conversion", value: format_percent(program.conversion_rate) }
            StatCard { label: "Rewards paid", value: format_currency(program.rewards_distributed) }
        }

        Card {
            CardHeader { title: "Top referrers" }
            CardContent {
                DataTable {
                    DataTableHeader {
                        DataTableColumn { "User" }
                        DataTableColumn { align_end: true, "Referrals" }
                        DataTableColumn { align_end: true, "Rewards" }
                    }
                    DataTableBody {
                        if program.top_referrers.is_empty() {
                            DataTableEmpty { colspan: 3, message: "No referrers yet." }
                        }
                        for referrer in program.top_referrers.iter() {
                            DataTableRow { key: "{referrer.user_id}",
                                DataTableCell {
                                    {referrer.user.as_ref().map(|u| u.display_name().to_string()).unwrap_or_else(|| referrer.user_id.clone())}
                                }
                                DataTableCell { align_end: true, {format_count(referrer.referrals_count)} }
                                DataTableCell { align_end: true, {format_currency(referrer.rewards_earned)} }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn draft_starts_at_thirty_days() {
        let settings = SettingsDraft::default().to_settings().unwrap();
        assert_eq!(settings.expiration_days, 30);
        assert_eq!(settings.reward_amount, 0.0);
    }

    #[test]
    fn draft_rejects_bad_numbers() {
        let draft = SettingsDraft {
            reward_amount: "25".into(),
            expiration_days: "two weeks".into(),
        };
        let err = draft.to_settings().unwrap_err();
        assert_eq!(err.message, "Enter a whole number of days");

        let zero = SettingsDraft {
            reward_amount: "25".into(),
            expiration_days: "0".into(),
        };
        assert!(zero.to_settings().is_err());
    }
}
