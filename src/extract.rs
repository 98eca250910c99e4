//! Per-row field extraction.
//!
//! Pure structural lookups against one `<tr>`: no I/O, no side
//! effects. Any missing piece short-circuits to `None` and the row is
//! silently dropped by the caller (best-effort collection).

use scraper::{ElementRef, Html, Selector};

use crate::types::RewardRecord;

const BADGE: &str = "span.badge";
const IMG: &str = "img[src]";
const NOSCRIPT: &str = "noscript";
const POWER: &str = "td.right";
const REWARD: &str = "td.cell.col.mythic--border-small";

/// Pull {badge, icon src, power, vbucks} out of one table row, in that
/// order, returning `None` at the first structurally absent field.
pub fn extract_row(row: ElementRef<'_>) -> Option<RewardRecord> {
    let badge = first_match(row, BADGE).map(element_text)?;
    let image_url = icon_src(row)?;
    let power = first_match(row, POWER).map(element_text)?;
    let vbucks = first_match(row, REWARD).map(stripped_text)?;

    Some(RewardRecord {
        badge,
        image_url: Some(image_url),
        power,
        vbucks,
    })
}

/// `src` of the row's image, looking inside a `<noscript>` container
/// when no image element is directly visible (lazy-loading markup
/// keeps the real `<img>` there as escaped text).
fn icon_src(row: ElementRef<'_>) -> Option<String> {
    if let Some(img) = first_match(row, IMG) {
        return img.value().attr("src").map(str::to_owned);
    }

    let noscript = first_match(row, NOSCRIPT)?;
    let inner: String = noscript.text().collect();
    let fragment = Html::parse_fragment(&inner);
    let img_sel = Selector::parse(IMG).ok()?;
    fragment
        .select(&img_sel)
        .next()
        .and_then(|img| img.value().attr("src"))
        .map(str::to_owned)
}

fn first_match<'a>(row: ElementRef<'a>, css: &str) -> Option<ElementRef<'a>> {
    let sel = Selector::parse(css).ok()?;
    row.select(&sel).next()
}

fn element_text(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

/// Concatenation of all text nodes with surrounding whitespace removed
/// from each, matching get_text(strip=True) semantics of the source
/// markup we scrape.
fn stripped_text(el: ElementRef<'_>) -> String {
    el.text().map(str::trim).filter(|t| !t.is_empty()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_ROW: &str = r#"
        <tr>
          <td><span class="badge">T</span></td>
          <td class="right"> 160 </td>
          <td><img src="/icons/vbucks-mission.png" alt=""></td>
          <td class="cell col mythic--border-small"> 50x <b>V-Bucks</b> </td>
        </tr>"#;

    // Bare <tr> fragments get foster-parented away by the HTML5
    // parser, so fixtures are wrapped in a table here.
    fn first_row(html: &str) -> Option<RewardRecord> {
        let doc = Html::parse_fragment(&format!("<table><tbody>{html}</tbody></table>"));
        let tr = Selector::parse("tr").unwrap();
        extract_row(doc.select(&tr).next().expect("fixture has a tr"))
    }

    #[test]
    fn extracts_all_four_fields() {
        let rec = first_row(FULL_ROW).expect("well-formed row");
        assert_eq!(rec.badge, "T");
        assert_eq!(
            rec.image_url.as_deref(),
            Some("/icons/vbucks-mission.png")
        );
        assert_eq!(rec.power, "160");
        assert_eq!(rec.vbucks, "50xV-Bucks");
    }

    #[test]
    fn missing_badge_drops_row() {
        let html = FULL_ROW.replace(r#"<span class="badge">T</span>"#, "");
        assert!(first_row(&html).is_none());
    }

    #[test]
    fn missing_image_drops_row() {
        let html = FULL_ROW.replace(r#"<img src="/icons/vbucks-mission.png" alt="">"#, "");
        assert!(first_row(&html).is_none());
    }

    #[test]
    fn missing_power_cell_drops_row() {
        let html = FULL_ROW.replace(r#"class="right""#, r#"class="left""#);
        assert!(first_row(&html).is_none());
    }

    #[test]
    fn missing_reward_cell_drops_row() {
        let html = FULL_ROW.replace("mythic--border-small", "plain");
        assert!(first_row(&html).is_none());
    }

    #[test]
    fn image_inside_noscript_is_found() {
        let html = r#"
            <tr>
              <td><span class="badge">P</span></td>
              <td class="right">140</td>
              <td><noscript><img src="https://cdn.example/icon.png"></noscript></td>
              <td class="cell col mythic--border-small">35x V-Bucks</td>
            </tr>"#;
        let rec = first_row(html).expect("noscript fallback");
        assert_eq!(
            rec.image_url.as_deref(),
            Some("https://cdn.example/icon.png")
        );
    }

    #[test]
    fn img_without_src_falls_through_to_none() {
        let html = FULL_ROW.replace(
            r#"<img src="/icons/vbucks-mission.png" alt="">"#,
            r#"<img alt="pending">"#,
        );
        assert!(first_row(&html).is_none());
    }
}
