// src/templates/dashboard.rs
//! Section editor pages and the form widgets they are built from.
use url::Url;

use super::{html_escape, render_dashboard_page};
use crate::forms::rich_text::RichText;
use crate::forms::{
    pending_field, pending_name_field, stored_field, EditorState, FormView, ImageSlot, NoticeKind,
    SectionForm, EDITING_ID_FIELD, FIX_ERRORS_SUMMARY,
};

pub fn render_editor<F: SectionForm>(
    state: &EditorState<F>,
    image_base: &Url,
    operator: &str,
) -> String {
    let section = F::SECTION;
    let view = FormView {
        errors: &state.errors,
        image_base,
        upload_dir: section.upload_dir(),
    };

    let editing_id = state
        .editing_id
        .map(|id| {
            format!(
                r#"<input type="hidden" name="{}" value="{}">"#,
                EDITING_ID_FIELD, id
            )
        })
        .unwrap_or_default();

    let summary = if state.errors.is_empty() {
        String::new()
    } else {
        format!(r#"<div class="form-summary">{}</div>"#, FIX_ERRORS_SUMMARY)
    };

    let content = format!(
        r#"
    <h1>{}</h1>
    {}
    <form class="editor-form" method="POST" action="{}" enctype="multipart/form-data" novalidate>
        {}
        {}
        {}
        <button type="submit" class="btn btn-primary">Save</button>
    </form>
    "#,
        section.title(),
        render_notice(state),
        section.dashboard_path(),
        editing_id,
        state.form.render_fields(&view),
        summary
    );

    render_dashboard_page(section.title(), &content, section.dashboard_path(), operator)
}

fn render_notice<F>(state: &EditorState<F>) -> String {
    match &state.notice {
        Some(notice) => alert(notice.kind, &notice.message),
        None => String::new(),
    }
}

pub fn alert(kind: NoticeKind, message: &str) -> String {
    let class = match kind {
        NoticeKind::Success => "alert alert-success",
        NoticeKind::Error => "alert alert-error",
    };
    format!(
        r#"<div class="{}" role="status">{}</div>"#,
        class,
        html_escape(message)
    )
}

fn field_error(view: &FormView<'_>, name: &str) -> String {
    view.errors
        .get(name)
        .map(|message| format!(r#"<p class="field-error">{}</p>"#, html_escape(message)))
        .unwrap_or_default()
}

fn group_class(view: &FormView<'_>, name: &str) -> &'static str {
    if view.errors.get(name).is_some() {
        "form-group has-error"
    } else {
        "form-group"
    }
}

pub fn text_field(view: &FormView<'_>, name: &str, label: &str, value: &str) -> String {
    input_field(view, name, label, value, "text", "")
}

/// Links are plain text inputs; the form decides which URL shape it accepts.
pub fn link_field(view: &FormView<'_>, name: &str, label: &str, value: &str) -> String {
    input_field(view, name, label, value, "text", r#"inputmode="url" placeholder="https://""#)
}

pub fn color_field(view: &FormView<'_>, name: &str, label: &str, value: &str) -> String {
    input_field(view, name, label, value, "text", r##"class="color-input" placeholder="#4BA135""##)
}

fn input_field(
    view: &FormView<'_>,
    name: &str,
    label: &str,
    value: &str,
    input_type: &str,
    extra: &str,
) -> String {
    format!(
        r#"
        <div class="{}">
            <label for="{}">{}</label>
            <input type="{}" id="{}" name="{}" value="{}" {}>
            {}
        </div>"#,
        group_class(view, name),
        name,
        label,
        input_type,
        name,
        name,
        html_escape(value),
        extra,
        field_error(view, name)
    )
}

pub fn textarea_field(view: &FormView<'_>, name: &str, label: &str, value: &str) -> String {
    format!(
        r#"
        <div class="{}">
            <label for="{}">{}</label>
            <textarea id="{}" name="{}" rows="3">{}</textarea>
            {}
        </div>"#,
        group_class(view, name),
        name,
        label,
        name,
        name,
        html_escape(value),
        field_error(view, name)
    )
}

/// File input with a preview. Hidden inputs carry the stored filename and
/// any not-yet-saved upload so a re-rendered form submits the same images.
pub fn image_field(view: &FormView<'_>, name: &str, label: &str, slot: &ImageSlot) -> String {
    let preview = match slot.preview_url(view.image_base, view.upload_dir) {
        Some(url) => format!(
            r#"<img class="image-preview" id="{}-preview" src="{}" alt="{}">"#,
            name,
            html_escape(&url),
            html_escape(label)
        ),
        None => format!(
            r#"<img class="image-preview" id="{}-preview" alt="{}" hidden>"#,
            name,
            html_escape(label)
        ),
    };

    let carried = carried_inputs(name, slot);

    format!(
        r#"
        <div class="{}">
            <label for="{}">{}</label>
            {}
            <input type="file" id="{}" name="{}" accept="image/*" data-preview="{}-preview">
            {}
            {}
        </div>"#,
        group_class(view, name),
        name,
        label,
        preview,
        name,
        name,
        name,
        carried,
        field_error(view, name)
    )
}

fn carried_inputs(name: &str, slot: &ImageSlot) -> String {
    match slot {
        ImageSlot::Stored(stored) => hidden(&stored_field(name), stored),
        ImageSlot::Selected(upload) if upload.is_image() => format!(
            "{}{}",
            hidden(&pending_field(name), &upload.data_url()),
            hidden(&pending_name_field(name), &upload.file_name)
        ),
        ImageSlot::Rejected { previous, .. } => carried_inputs(name, previous),
        _ => String::new(),
    }
}

/// Textarea enhanced into a rich text editor by `dashboard.js`.
pub fn rich_text_field(view: &FormView<'_>, name: &str, label: &str, text: &RichText) -> String {
    format!(
        r#"
        <div class="{}">
            <label for="{}">{}</label>
            <div class="rich-text-editor" data-target="{}"></div>
            <textarea id="{}" name="{}" class="rich-text-source" rows="6">{}</textarea>
            {}
        </div>"#,
        group_class(view, name),
        name,
        label,
        name,
        name,
        name,
        html_escape(text.as_str()),
        field_error(view, name)
    )
}

fn hidden(name: &str, value: &str) -> String {
    format!(
        r#"<input type="hidden" name="{}" value="{}">"#,
        name,
        html_escape(value)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::{png, BannerForm, EditorEvent, FieldErrors, UploadedImage};

    fn base() -> Url {
        Url::parse("https://api.goals.app/").unwrap()
    }

    #[test]
    fn test_image_field_carries_slot() {
        let errors = FieldErrors::new();
        let base = base();
        let view = FormView {
            errors: &errors,
            image_base: &base,
            upload_dir: "banner",
        };

        let stored = image_field(&view, "img1", "Background image", &ImageSlot::Stored("bg.png".into()));
        assert!(stored.contains(r#"src="https://api.goals.app/uploads/banner/bg.png""#));
        assert!(stored.contains(r#"name="img1__stored" value="bg.png""#));

        let selected = image_field(&view, "img2", "Mobile image", &ImageSlot::Selected(png("m.png")));
        assert!(selected.contains(r#"src="data:image/png;base64,"#));
        assert!(selected.contains(r#"name="img2__pending""#));
        assert!(selected.contains(r#"name="img2__pending_name" value="m.png""#));

        let rejected = ImageSlot::Rejected {
            upload: UploadedImage::new("notes.pdf", "application/pdf", vec![1]),
            previous: Box::new(ImageSlot::Stored("bg.png".into())),
        };
        let html = image_field(&view, "img1", "Background image", &rejected);
        assert!(html.contains(r#"name="img1__stored" value="bg.png""#));
        assert!(html.contains(r#"src="https://api.goals.app/uploads/banner/bg.png""#));
    }

    #[test]
    fn test_editor_shows_errors_and_values() {
        let mut errors = FieldErrors::new();
        errors.add("title", "Title is required");
        let state = EditorState::<BannerForm>::default()
            .apply(EditorEvent::Loaded {
                form: BannerForm {
                    subtitle: "<b>Plan</b>".into(),
                    ..BannerForm::default()
                },
                id: Some(3),
            })
            .apply(EditorEvent::Rejected(errors));

        let html = render_editor(&state, &base(), "ops@goals.app");
        assert!(html.contains(r#"<p class="field-error">Title is required</p>"#));
        assert!(html.contains(FIX_ERRORS_SUMMARY));
        assert!(html.contains("&lt;b&gt;Plan&lt;/b&gt;"));
        assert!(html.contains(r#"name="editing_id" value="3""#));
        assert!(html.contains(r#"action="/dashboard/banner""#));
    }
}
