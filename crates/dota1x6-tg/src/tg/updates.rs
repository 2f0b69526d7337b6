use crate::dota::{patch, UpdatePage};
use crate::prelude::*;
use crate::{tg, ErrorKind, Result};
use patch_fmt::PatchNote;
use teloxide::prelude::*;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup, InputFile};
use teloxide::utils::markdown;
use url::Url;

const UNTITLED: &str = "Без названия";
const EMPTY_NOTE: &str = "Описание обновления отсутствует.";

/// Sends the most recent update. Fetch failures are reported to the user
/// with a fallback text and aren't propagated.
#[instrument(skip_all)]
pub(crate) async fn send_latest(ctx: &tg::Ctx, msg: &Message) -> Result {
    ctx.bot
        .send_message(msg.chat.id, markdown::escape("🔎 Ищу последнее обновление..."))
        .await?;

    let raw = match ctx.dota.latest_update().await {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            let text = "Не удалось получить информацию об обновлениях с API. Попробуйте позже.";
            ctx.bot
                .send_message(msg.chat.id, markdown::escape(text))
                .await?;
            return Ok(());
        }
        Err(err) => {
            warn!(err = tracing_err(&err), "Couldn't fetch the latest update");
            let text = "Не удалось получить информацию об обновлениях с API. Попробуйте позже.";
            ctx.bot
                .send_message(msg.chat.id, tg::failure_text(text, &err))
                .await?;
            return Ok(());
        }
    };

    let note = patch::decode(&raw);
    let slug = patch::slug(&raw);
    let page_url = slug.map(|slug| ctx.dota.update_url(slug));

    let (note, images) = if !note.items.is_empty() || !note.heroes.is_empty() {
        debug!("The API returned a structured update");
        (note, vec![])
    } else {
        let Some(slug) = slug else {
            let text = "В полученных данных нет ссылки на обновление. Попробуйте позже.";
            ctx.bot
                .send_message(msg.chat.id, markdown::escape(text))
                .await?;
            return Ok(());
        };

        match ctx.dota.update_page(slug).await {
            Ok(page) => page_note(page),
            Err(err) => {
                warn!(err = tracing_err(&err), "Couldn't fetch the update page");
                let text = page_failure_text(&err);
                ctx.bot
                    .send_message(msg.chat.id, tg::failure_text(text, &err))
                    .await?;
                return Ok(());
            }
        }
    };

    let message = ctx.formatter.assemble(&with_fallbacks(note));

    ctx.bot.reply_chunked(msg, &message).await?;

    send_images(ctx, msg, images).await;

    if let Some(page_url) = page_url {
        let button = InlineKeyboardButton::url("Читать на сайте", page_url);

        ctx.bot
            .send_message(msg.chat.id, markdown::escape("Источник:"))
            .reply_markup(InlineKeyboardMarkup::new([[button]]))
            .await?;
    }

    Ok(())
}

fn page_note(page: UpdatePage) -> (PatchNote, Vec<Url>) {
    let note = PatchNote {
        title: page.title,
        body_text: Some(page.text),
        items: vec![],
        heroes: vec![],
    };
    (note, page.images)
}

/// The user must never receive an empty message
fn with_fallbacks(mut note: PatchNote) -> PatchNote {
    if note.title.trim().is_empty() {
        note.title = UNTITLED.to_owned();
    }
    if note.is_empty() {
        note.body_text = Some(EMPTY_NOTE.to_owned());
    }
    note
}

fn page_failure_text(err: &crate::Error) -> &'static str {
    if let ErrorKind::Scrape { .. } = err.kind() {
        return "Не удалось найти контент обновления. Возможно, сайт изменился.";
    }
    if tg::is_http_status_error(err) {
        return "Не удалось получить информацию об обновлении. Возможно, сайт недоступен.";
    }
    "Произошла ошибка при получении данных. Попробуйте позже."
}

/// Every image is sent independently. Telegram may fail to fetch the image
/// by URL itself, so in that case we download it and upload the bytes.
async fn send_images(ctx: &tg::Ctx, msg: &Message, images: Vec<Url>) {
    let max_images = ctx.dota.cfg().max_images;

    for url in images.into_iter().take(max_images) {
        let Err(err) = ctx
            .bot
            .send_photo(msg.chat.id, InputFile::url(url.clone()))
            .await
        else {
            continue;
        };

        debug!(
            err = tracing_err(&err),
            %url,
            "Telegram couldn't fetch the image by URL, uploading it instead"
        );

        let result = async {
            let bytes = ctx.dota.download(url.clone()).await?;
            if bytes.is_empty() {
                return Ok(());
            }
            ctx.bot
                .send_photo(msg.chat.id, InputFile::memory(bytes.to_vec()))
                .await?;
            Ok::<_, crate::Error>(())
        }
        .await;

        if let Err(err) = result {
            warn!(err = tracing_err(&err), %url, "Failed to send the image");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use expect_test::expect;

    #[test]
    fn empty_note_fallbacks() {
        let note = with_fallbacks(PatchNote::default());
        let message = patch_fmt::Formatter::default().assemble(&note);

        expect![[r#"
            *Без названия*

            Описание обновления отсутствует\."#]]
        .assert_eq(&message);
    }

    #[test]
    fn page_note_keeps_text() {
        let page = UpdatePage {
            url: "https://dota1x6.com/updates/patch-1-5".parse().unwrap(),
            title: "Patch 1.5".to_owned(),
            text: "Laguna Blade теперь наносит магический урон".to_owned(),
            images: vec!["https://dota1x6.com/a.png".parse().unwrap()],
        };

        let (note, images) = page_note(page);
        let message = patch_fmt::Formatter::default().assemble(&with_fallbacks(note));

        expect![[r#"
            *Patch 1\.5*

            🔥 Laguna Blade теперь наносит 🔮 магический урон"#]]
        .assert_eq(&message);

        assert_eq!(images.len(), 1);
    }
}
