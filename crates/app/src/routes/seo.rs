use dioxus::prelude::*;
use shared_types::{format_meta_tags, parse_meta_tags, SeoSettings, ViewState};
use shared_ui::{
    use_toast, Button, ButtonVariant, Card, CardContent, CardHeader, EmptyState, PageHeader,
    SelectCheckbox, SkeletonRows, Textarea,
};

use crate::auth::use_api;
use crate::feedback;

/// Editable copy of the settings. Meta tags are edited as `name: content`
/// lines; schema markup is carried through untouched.
#[derive(Debug, Clone, PartialEq)]
struct SeoForm {
    sitemap_enabled: bool,
    robots_txt: String,
    meta_text: String,
    schema_markup: serde_json::Value,
}

impl From<&SeoSettings> for SeoForm {
    fn from(settings: &SeoSettings) -> Self {
        Self {
            sitemap_enabled: settings.sitemap_enabled,
            robots_txt: settings.robots_txt.clone(),
            meta_text: format_meta_tags(&settings.meta_tags),
            schema_markup: settings.schema_markup.clone(),
        }
    }
}

impl SeoForm {
    fn to_settings(&self) -> SeoSettings {
        SeoSettings {
            sitemap_enabled: self.sitemap_enabled,
            robots_txt: self.robots_txt.clone(),
            meta_tags: parse_meta_tags(&self.meta_text),
            schema_markup: self.schema_markup.clone(),
        }
    }
}

#[component]
pub fn Seo() -> Element {
    let api = use_api();
    let toast = use_toast();

    let mut state = use_signal(ViewState::<SeoSettings>::default);
    let mut form = use_signal(|| SeoForm::from(&SeoSettings::default()));
    let mut saving = use_signal(|| false);
    let mut regenerating = use_signal(|| false);

    let _settings = use_resource({
        let api = api.clone();
        move || {
            let api = api.clone();
            async move {
                state.write().begin();
                let result = api.seo_settings().await;
                if let Ok(Some(settings)) = &result {
                    form.set(SeoForm::from(settings));
                }
                if let Some(err) = state.write().finish(result) {
                    feedback::failure(toast, &err, "Failed to load SEO settings");
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
                let settings = form.read().to_settings();
                match api.update_seo_settings(&settings).await {
                    Ok(()) => {
                        feedback::success(toast, "SEO settings saved");
                        form.set(SeoForm::from(&settings));
                    }
                    Err(e) => feedback::failure(toast, &e, "Failed to save SEO settings"),
                }
                saving.set(false);
            });
        }
    };

    let regenerate = {
        let api = api.clone();
        move |_: MouseEvent| {
            let api = api.clone();
            spawn(async move {
                regenerating.set(true);
                match api.regenerate_sitemap().await {
                    Ok(()) => feedback::success(toast, "Sitemap regenerated"),
                    Err(e) => feedback::failure(toast, &e, "Failed to regenerate sitemap"),
                }
                regenerating.set(false);
            });
        }
    };

    let loading = matches!(*state.read(), ViewState::Loading);
    let f = form();

    rsx! {
        PageHeader {
            title: "SEO",
            description: "Search engine visibility for public pages",
            Button {
                variant: ButtonVariant::Outline,
                loading: regenerating(),
                loading_text: "Regenerating...",
                disabled: !f.sitemap_enabled,
                onclick: regenerate,
                "Regenerate sitemap"
            }
        }

        if loading {
            SkeletonRows { count: 4 }
        } else {
            if matches!(*state.read(), ViewState::Empty) {
                EmptyState { message: "No SEO settings saved yet. Saving creates them." }
            }
            Card {
                CardHeader { title: "Crawling" }
                CardContent {
                    div { class: "checkbox-row",
                        SelectCheckbox {
                            checked: f.sitemap_enabled,
                            on_toggle: move |on: bool| form.write().sitemap_enabled = on,
                        }
                        span { class: "checkbox-label", "Publish sitemap.xml" }
                    }
                    Textarea {
                        label: "robots.txt",
                        rows: 8,
                        value: f.robots_txt.clone(),
                        on_input: move |e: FormEvent| form.write().robots_txt = e.value(),
                    }
                }
            }
            Card {
                CardHeader { title: "Meta tags", description: "One tag per line as name: content" }
                CardContent {
                    Textarea {
                        label: "Tags",
                        rows: 6,
                        placeholder: "description: Find vetted contractors",
                        value: f.meta_text.clone(),
                        on_input: move |e: FormEvent| form.write().meta_text = e.value(),
                    }
                    div { class: "filter-actions",
                        Button { loading: saving(), loading_text: "Saving...", onclick: save, "Save settings" }
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
    fn form_keeps_schema_and_rebuilds_tags() {
        let mut settings = SeoSettings::default();
        settings.schema_markup = serde_json::json!({"@type": "Organization"});
        settings.meta_tags.insert("description".into(), "Local pros".into());

        let mut form = SeoForm::from(&settings);
        assert_eq!(form.meta_text, "description: Local pros");
        form.meta_text.push_str("\nkeywords: plumbing");

        let saved = form.to_settings();
        assert_eq!(saved.meta_tags.len(), 2);
        assert_eq!(saved.schema_markup, settings.schema_markup);
    }
}
