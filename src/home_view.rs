use super::*;

/// Ids shown on the dataset home page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DatasetIndex {
    documents: Vec<String>,
    dialogues: Vec<String>,
    dpo_dialogues: Vec<String>,
}

impl DatasetIndex {
    /// Documents and dialogues keep their input order; DPO ids are reduced
    /// with [`unique_dpo_ids`].
    pub fn new<D, G, P>(documents: D, dialogues: G, dpo_dialogues: P) -> Self
    where
        D: IntoIterator,
        D::Item: Into<String>,
        G: IntoIterator,
        G::Item: Into<String>,
        P: IntoIterator,
        P::Item: Into<String>,
    {
        Self {
            documents: documents.into_iter().map(Into::into).collect(),
            dialogues: dialogues.into_iter().map(Into::into).collect(),
            dpo_dialogues: unique_dpo_ids(dpo_dialogues),
        }
    }

    pub fn documents(&self) -> &[String] {
        &self.documents
    }

    pub fn dialogues(&self) -> &[String] {
        &self.dialogues
    }

    pub fn dpo_dialogues(&self) -> &[String] {
        &self.dpo_dialogues
    }

    /// Renders the home page markup the behaviours attach to.
    ///
    /// Toggle, filter, item and key selectors must each name a class
    /// (`.name` or `tag.name`) so the rendered elements can carry it.
    pub fn render(&self, config: &ViewConfig) -> Result<String> {
        config.validate()?;
        let classes = MarkupClasses {
            toggle: class_of("toggle_selector", &config.toggle_selector)?,
            filter: class_of("filter_selector", &config.filter_selector)?,
            item: class_of("item_selector", &config.item_selector)?,
            key: class_of("item_key_selector", &config.item_key_selector)?,
        };

        let mut out = String::new();
        out.push_str("<!DOCTYPE html>\n<html>\n<head><title>Dataset Visualization</title></head>\n<body>\n");
        render_section(
            &mut out,
            config,
            &classes,
            "Documents",
            &config.primary_list_id,
            &self.documents,
            Some(Category::Document),
        );
        render_section(
            &mut out,
            config,
            &classes,
            "Dialogues",
            &config.dialogue_list_id,
            &self.dialogues,
            Some(Category::Dialogue),
        );
        render_section(
            &mut out,
            config,
            &classes,
            "DPO Dialogues",
            &config.secondary_list_id,
            &self.dpo_dialogues,
            None,
        );
        out.push_str("</body>\n</html>\n");
        Ok(out)
    }
}

struct MarkupClasses<'a> {
    toggle: &'a str,
    filter: &'a str,
    item: &'a str,
    key: &'a str,
}

fn class_of<'a>(field: &str, selector: &'a str) -> Result<&'a str> {
    let selector = selector.trim();
    let class_name = selector
        .find('.')
        .filter(|dot| {
            selector[..*dot]
                .bytes()
                .all(|b| b.is_ascii_alphanumeric())
        })
        .map(|dot| &selector[dot + 1..])
        .filter(|name| {
            !name.is_empty()
                && name
                    .bytes()
                    .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
        });
    class_name.ok_or_else(|| {
        Error::InvalidConfig(format!(
            "{field} must be a single class selector to render markup, got {selector:?}"
        ))
    })
}

fn render_section(
    out: &mut String,
    config: &ViewConfig,
    classes: &MarkupClasses<'_>,
    title: &str,
    list_id: &str,
    ids: &[String],
    filter: Option<Category>,
) {
    let list_id = html::escape_attr(list_id);
    out.push_str("<section class=\"list-section\">\n");
    out.push_str(&format!(
        "  <div class=\"section-header\"><h2>{}</h2><button class=\"{}\" {}=\"{}\">{}</button></div>\n",
        html::escape_text(title),
        classes.toggle,
        config.toggle_target_attr,
        list_id,
        html::escape_text(&config.expand_label)
    ));
    out.push_str(&format!("  <ul id=\"{list_id}\" class=\"item-list\">\n"));
    for id in ids {
        out.push_str(&format!(
            "    <li class=\"{}\"><a class=\"{}\">{}</a>",
            classes.item,
            classes.key,
            html::escape_text(id)
        ));
        if let Some(category) = filter {
            out.push_str(&format!(
                "<button class=\"{}\" {}=\"{}\" {}=\"{}\">Filter</button>",
                classes.filter,
                config.filter_id_attr,
                html::escape_attr(id),
                config.filter_category_attr,
                category.as_str()
            ));
        }
        out.push_str("</li>\n");
    }
    out.push_str("  </ul>\n</section>\n");
}

/// Id of the DPO dialogue one step earlier in the same chain.
///
/// `dc1_ch[0_1]_dpo[11_19_7]` steps back to `dc1_ch[0_1]_dpo[11_19]`. A chain
/// with a single rule index has no predecessor.
pub fn previous_dpo_id(id: &str) -> Option<String> {
    let base_end = id.find("_dpo[")?;
    let open = id.rfind('[')?;
    let close = id.rfind(']')?;
    if open < base_end || close < open {
        return None;
    }

    let indices = id[open + 1..close]
        .split('_')
        .map(|raw| raw.parse::<u64>().ok())
        .collect::<Option<Vec<_>>>()?;
    let (_, kept) = indices.split_last()?;
    if kept.is_empty() {
        return None;
    }

    let kept = kept
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("_");
    Some(format!("{}_dpo[{kept}]", &id[..base_end]))
}

/// Keeps only the longest id of each DPO chain, ordered by character count then id.
pub fn unique_dpo_ids<I>(ids: I) -> Vec<String>
where
    I: IntoIterator,
    I::Item: Into<String>,
{
    let all = ids.into_iter().map(Into::into).collect::<HashSet<String>>();

    let mut superseded = HashSet::new();
    for id in &all {
        let mut cursor = previous_dpo_id(id);
        while let Some(prev) = cursor {
            cursor = previous_dpo_id(&prev);
            if !superseded.insert(prev) {
                // The rest of this chain was already walked.
                break;
            }
        }
    }

    let mut out = all
        .into_iter()
        .filter(|id| !superseded.contains(id))
        .collect::<Vec<_>>();
    out.sort_by_cached_key(|id| (id.chars().count(), id.clone()));
    out
}
