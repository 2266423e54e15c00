//! Sentence templates and the assembler that runs them in report order.
//!
//! Each template names the statistics it reads and renders zero or more
//! sentences. Templates backed by a list emit one sentence per entry that
//! actually exists, so short lists shrink the report instead of failing it.

use tracing::warn;

use crate::error::Result;
use crate::normalize::Results;
use crate::queries::Stat;
use crate::stats::{with_commas, PageTotals, Percent};

/// Ordinal prefixes for the top-5 link rankings. Rank 0 reads as plain "most".
pub const RANK_ORDINALS: [&str; 5] = ["", "second ", "third ", "fourth ", "fifth "];

/// Ordinal prefixes for the longest titles without spaces.
pub const LENGTH_ORDINALS: [&str; 3] = ["", "second-", "third-"];

pub struct FactContext<'a> {
    pub results: &'a Results,
    pub totals: PageTotals,
}

pub struct FactTemplate {
    pub name: &'static str,
    pub inputs: &'static [Stat],
    pub render: fn(&FactContext<'_>) -> Result<Vec<String>>,
}

/// Report order.
pub const TEMPLATES: &[FactTemplate] = &[
    FactTemplate {
        name: "total_pages",
        inputs: &[Stat::NonRedirectPagesCount],
        render: total_pages,
    },
    FactTemplate {
        name: "total_links",
        inputs: &[Stat::LinksCount],
        render: total_links,
    },
    FactTemplate {
        name: "total_redirects",
        inputs: &[Stat::RedirectsCount],
        render: total_redirects,
    },
    FactTemplate {
        name: "first_alphabetically",
        inputs: &[Stat::FirstPageAlphabetically],
        render: first_alphabetically,
    },
    FactTemplate {
        name: "last_alphabetically",
        inputs: &[Stat::LastPageAlphabetically],
        render: last_alphabetically,
    },
    FactTemplate {
        name: "no_links",
        inputs: &[Stat::PagesWithNoLinksCount],
        render: no_links,
    },
    FactTemplate {
        name: "no_outgoing_links",
        inputs: &[Stat::PagesWithNoOutgoingLinksCount, Stat::PagesWithNoLinksCount],
        render: no_outgoing_links,
    },
    FactTemplate {
        name: "no_incoming_links",
        inputs: &[Stat::PagesWithNoIncomingLinksCount, Stat::PagesWithNoLinksCount],
        render: no_incoming_links,
    },
    FactTemplate {
        name: "longest_title",
        inputs: &[Stat::LongestPageTitle],
        render: longest_title,
    },
    FactTemplate {
        name: "single_character_titles",
        inputs: &[Stat::SingleCharacterTitlesCount, Stat::SingleCharacterTitles],
        render: single_character_titles,
    },
    FactTemplate {
        name: "longest_titles_without_spaces",
        inputs: &[Stat::LongestPageTitlesWithNoSpaces],
        render: longest_titles_without_spaces,
    },
    FactTemplate {
        name: "starting_with_exclamation_mark",
        inputs: &[Stat::TitlesStartingWithExclamationMarkCount],
        render: starting_with_exclamation_mark,
    },
    FactTemplate {
        name: "containing_exclamation_mark",
        inputs: &[Stat::TitlesContainingExclamationMarkCount],
        render: containing_exclamation_mark,
    },
    FactTemplate {
        name: "starting_with_question_mark",
        inputs: &[Stat::TitlesStartingWithQuestionMarkCount],
        render: starting_with_question_mark,
    },
    FactTemplate {
        name: "containing_question_mark",
        inputs: &[Stat::TitlesContainingQuestionMarkCount],
        render: containing_question_mark,
    },
    FactTemplate {
        name: "containing_spaces",
        inputs: &[Stat::TitlesContainingSpacesCount],
        render: containing_spaces,
    },
    FactTemplate {
        name: "containing_no_spaces",
        inputs: &[Stat::TitlesContainingNoSpacesCount],
        render: containing_no_spaces,
    },
    FactTemplate {
        name: "containing_quotation_mark",
        inputs: &[Stat::TitlesContainingQuotationMarkCount],
        render: containing_quotation_mark,
    },
    FactTemplate {
        name: "most_outgoing_links",
        inputs: &[Stat::PagesWithMostOutgoingLinks],
        render: most_outgoing_links,
    },
    FactTemplate {
        name: "most_incoming_links",
        inputs: &[Stat::PagesWithMostIncomingLinks],
        render: most_incoming_links,
    },
];

/// Renders every template in order. `totals` must already be derived from
/// `results`, which is what makes the page count available to every
/// percentage.
pub fn assemble(results: &Results, totals: PageTotals) -> Result<Vec<String>> {
    let ctx = FactContext { results, totals };
    let mut facts = Vec::new();
    for template in TEMPLATES {
        let sentences = (template.render)(&ctx)?;
        if sentences.is_empty() {
            warn!(template = template.name, "no data, fact omitted");
        }
        facts.extend(sentences);
    }
    Ok(facts)
}

fn one(sentence: String) -> Result<Vec<String>> {
    Ok(vec![sentence])
}

/// Picks the singular or plural form for `n`.
pub fn plural<'a>(n: u64, singular: &'a str, many: &'a str) -> &'a str {
    if n == 1 {
        singular
    } else {
        many
    }
}

fn char_len(title: &str) -> u64 {
    title.chars().count() as u64
}

fn total_pages(ctx: &FactContext<'_>) -> Result<Vec<String>> {
    let n = ctx.totals.pages();
    one(format!(
        "Wikipedia contains {} {}.",
        with_commas(n),
        plural(n, "page", "pages")
    ))
}

fn total_links(ctx: &FactContext<'_>) -> Result<Vec<String>> {
    let n = ctx.results.count(Stat::LinksCount)?;
    one(format!(
        "There {} a total of {} {} between Wikipedia pages.",
        plural(n, "is", "are"),
        with_commas(n),
        plural(n, "link", "links")
    ))
}

fn total_redirects(ctx: &FactContext<'_>) -> Result<Vec<String>> {
    let n = ctx.results.count(Stat::RedirectsCount)?;
    one(format!(
        "{} Wikipedia {} actually just {}.",
        with_commas(n),
        plural(n, "page is", "pages are"),
        plural(n, "a redirect to another page", "redirects to other pages")
    ))
}

fn first_alphabetically(ctx: &FactContext<'_>) -> Result<Vec<String>> {
    Ok(ctx
        .results
        .text(Stat::FirstPageAlphabetically)?
        .map(|title| format!("The alphabetically first Wikipedia page is \"{}\".", title))
        .into_iter()
        .collect())
}

fn last_alphabetically(ctx: &FactContext<'_>) -> Result<Vec<String>> {
    Ok(ctx
        .results
        .text(Stat::LastPageAlphabetically)?
        .map(|title| format!("The alphabetically last Wikipedia page is \"{}\".", title))
        .into_iter()
        .collect())
}

fn no_links(ctx: &FactContext<'_>) -> Result<Vec<String>> {
    let n = ctx.results.count(Stat::PagesWithNoLinksCount)?;
    one(format!(
        "{} Wikipedia {} ({}% of all pages) {} no incoming or outgoing links.",
        with_commas(n),
        plural(n, "page", "pages"),
        ctx.totals.percent_of_total(n, 3),
        plural(n, "has", "have")
    ))
}

// Pages with no links row at all are not counted by the outgoing/incoming
// queries, so they are added back in here.
fn no_outgoing_links(ctx: &FactContext<'_>) -> Result<Vec<String>> {
    let n = ctx.results.count(Stat::PagesWithNoOutgoingLinksCount)?
        + ctx.results.count(Stat::PagesWithNoLinksCount)?;
    one(format!(
        "There {} {} Wikipedia {} ({}% of all pages) which {} not link to any other pages.",
        plural(n, "is", "are"),
        with_commas(n),
        plural(n, "page", "pages"),
        ctx.totals.percent(n),
        plural(n, "does", "do")
    ))
}

fn no_incoming_links(ctx: &FactContext<'_>) -> Result<Vec<String>> {
    let n = ctx.results.count(Stat::PagesWithNoIncomingLinksCount)?
        + ctx.results.count(Stat::PagesWithNoLinksCount)?;
    one(format!(
        "There {} {} Wikipedia {} ({}% of all pages) which {} not linked to from any other pages.",
        plural(n, "is", "are"),
        with_commas(n),
        plural(n, "page", "pages"),
        ctx.totals.percent(n),
        plural(n, "is", "are")
    ))
}

fn longest_title(ctx: &FactContext<'_>) -> Result<Vec<String>> {
    Ok(ctx
        .results
        .text(Stat::LongestPageTitle)?
        .map(|title| {
            let len = char_len(&title);
            format!(
                "At an impressive {} {} long, \"{}\" is the Wikipedia page with the longest title.",
                with_commas(len),
                plural(len, "character", "characters"),
                title
            )
        })
        .into_iter()
        .collect())
}

/// Joins quoted titles: `"a"`, `"a" and "b"`, `"a", "b", and "c"`.
pub fn quoted_list(titles: &[String]) -> String {
    let quoted: Vec<String> = titles.iter().map(|t| format!("\"{}\"", t)).collect();
    match quoted.as_slice() {
        [] => String::new(),
        [a] => a.clone(),
        [a, b] => format!("{} and {}", a, b),
        [init @ .., last] => format!("{}, and {}", init.join(", "), last),
    }
}

/// Up to three examples taken from the head and tail of `titles`.
pub fn head_and_tail(titles: &[String]) -> Vec<String> {
    match titles {
        [] | [_] | [_, _] | [_, _, _] => titles.to_vec(),
        [first, second, .., last] => vec![first.clone(), second.clone(), last.clone()],
    }
}

fn single_character_titles(ctx: &FactContext<'_>) -> Result<Vec<String>> {
    let n = ctx.results.count(Stat::SingleCharacterTitlesCount)?;
    let titles = ctx.results.texts(Stat::SingleCharacterTitles)?;
    let examples = head_and_tail(&titles);
    let head = format!(
        "There {} {} Wikipedia {} ({}% of all pages) whose {} a single character long",
        plural(n, "is", "are"),
        with_commas(n),
        plural(n, "page", "pages"),
        ctx.totals.percent_of_total(n, 3),
        plural(n, "title is", "titles are")
    );
    if examples.is_empty() {
        return one(format!("{}.", head));
    }
    if examples.len() < 3 {
        warn!(examples = examples.len(), "few single character titles to quote");
    }
    one(format!("{}, including {}.", head, quoted_list(&examples)))
}

fn longest_titles_without_spaces(ctx: &FactContext<'_>) -> Result<Vec<String>> {
    let titles = ctx.results.texts(Stat::LongestPageTitlesWithNoSpaces)?;
    Ok(titles
        .iter()
        .zip(LENGTH_ORDINALS)
        .map(|(title, ordinal)| {
            let len = char_len(title);
            format!(
                "At {} {} long, \"{}\" is the Wikipedia page with the {}longest title containing no spaces.",
                with_commas(len),
                plural(len, "character", "characters"),
                title,
                ordinal
            )
        })
        .collect())
}

fn starting_with(n: u64, mark: &str) -> String {
    format!(
        "Only {} Wikipedia {} with {}.",
        with_commas(n),
        plural(n, "page starts", "pages start"),
        mark
    )
}

fn containing(n: u64, percent: Percent, what: &str) -> String {
    format!(
        "{} Wikipedia {} ({}%) {} containing {}.",
        with_commas(n),
        plural(n, "page", "pages"),
        percent,
        plural(n, "has a title", "have titles"),
        what
    )
}

fn starting_with_exclamation_mark(ctx: &FactContext<'_>) -> Result<Vec<String>> {
    let n = ctx.results.count(Stat::TitlesStartingWithExclamationMarkCount)?;
    one(starting_with(n, "an exclamation mark"))
}

fn containing_exclamation_mark(ctx: &FactContext<'_>) -> Result<Vec<String>> {
    let n = ctx.results.count(Stat::TitlesContainingExclamationMarkCount)?;
    one(containing(n, ctx.totals.percent(n), "an exclamation mark"))
}

fn starting_with_question_mark(ctx: &FactContext<'_>) -> Result<Vec<String>> {
    let n = ctx.results.count(Stat::TitlesStartingWithQuestionMarkCount)?;
    one(starting_with(n, "a question mark"))
}

fn containing_question_mark(ctx: &FactContext<'_>) -> Result<Vec<String>> {
    let n = ctx.results.count(Stat::TitlesContainingQuestionMarkCount)?;
    one(containing(n, ctx.totals.percent(n), "a question mark"))
}

fn containing_spaces(ctx: &FactContext<'_>) -> Result<Vec<String>> {
    let n = ctx.results.count(Stat::TitlesContainingSpacesCount)?;
    one(containing(n, ctx.totals.percent_of_total(n, 1), "a space"))
}

fn containing_no_spaces(ctx: &FactContext<'_>) -> Result<Vec<String>> {
    let n = ctx.results.count(Stat::TitlesContainingNoSpacesCount)?;
    one(containing(n, ctx.totals.percent_of_total(n, 1), "no spaces"))
}

fn containing_quotation_mark(ctx: &FactContext<'_>) -> Result<Vec<String>> {
    let n = ctx.results.count(Stat::TitlesContainingQuotationMarkCount)?;
    one(format!(
        "Quotation marks appear in the {} of {} Wikipedia {} ({}% of all pages), causing innumerable parsing headaches.",
        plural(n, "title", "titles"),
        with_commas(n),
        plural(n, "page", "pages"),
        ctx.totals.percent(n)
    ))
}

fn most_outgoing_links(ctx: &FactContext<'_>) -> Result<Vec<String>> {
    let ranked = ctx.results.ranked(Stat::PagesWithMostOutgoingLinks)?;
    Ok(ranked
        .iter()
        .zip(RANK_ORDINALS)
        .map(|((title, count), ordinal)| {
            format!(
                "\"{}\" is the Wikipedia page with the {}most outgoing links ({}).",
                title,
                ordinal,
                with_commas(*count)
            )
        })
        .collect())
}

fn most_incoming_links(ctx: &FactContext<'_>) -> Result<Vec<String>> {
    let ranked = ctx.results.ranked(Stat::PagesWithMostIncomingLinks)?;
    Ok(ranked
        .iter()
        .zip(RANK_ORDINALS)
        .map(|((title, count), ordinal)| {
            format!(
                "\"{}\" is the {}most linked-to page on Wikipedia ({} incoming {}).",
                title,
                ordinal,
                with_commas(*count),
                plural(*count, "link", "links")
            )
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::{Normalized, Scalar};

    fn count(results: &mut Results, stat: Stat, n: i64) {
        results.insert(stat, Normalized::Scalar(Scalar::Int(n)));
    }

    fn titles(list: &[&str]) -> Normalized {
        Normalized::List(list.iter().map(|t| Scalar::Text(t.to_string())).collect())
    }

    fn ranked(rows: &[(&str, i64)]) -> Normalized {
        Normalized::Rows(
            rows.iter()
                .map(|(t, n)| vec![Scalar::Text(t.to_string()), Scalar::Int(*n)])
                .collect(),
        )
    }

    fn render(template: &str, results: &Results, pages: u64) -> Vec<String> {
        let ctx = FactContext {
            results,
            totals: PageTotals::new(pages).unwrap(),
        };
        let t = TEMPLATES.iter().find(|t| t.name == template).unwrap();
        (t.render)(&ctx).unwrap()
    }

    #[test]
    fn headline_counts_use_grouping() {
        let mut r = Results::default();
        count(&mut r, Stat::LinksCount, 5_000_000);
        count(&mut r, Stat::RedirectsCount, 200_000);
        assert_eq!(
            render("total_pages", &r, 1_000_000),
            vec!["Wikipedia contains 1,000,000 pages."]
        );
        assert_eq!(
            render("total_links", &r, 1_000_000),
            vec!["There are a total of 5,000,000 links between Wikipedia pages."]
        );
        assert_eq!(
            render("total_redirects", &r, 1_000_000),
            vec!["200,000 Wikipedia pages are actually just redirects to other pages."]
        );
    }

    #[test]
    fn no_outgoing_adds_pages_without_links_row() {
        let mut r = Results::default();
        count(&mut r, Stat::PagesWithNoOutgoingLinksCount, 150);
        count(&mut r, Stat::PagesWithNoLinksCount, 50);
        assert_eq!(
            render("no_outgoing_links", &r, 1_000),
            vec!["There are 200 Wikipedia pages (20.00% of all pages) which do not link to any other pages."]
        );
    }

    #[test]
    fn no_links_uses_three_decimals() {
        let mut r = Results::default();
        count(&mut r, Stat::PagesWithNoLinksCount, 1);
        assert_eq!(
            render("no_links", &r, 3),
            vec!["1 Wikipedia page (33.333% of all pages) has no incoming or outgoing links."]
        );
    }

    #[test]
    fn longest_title_counts_characters_not_bytes() {
        let mut r = Results::default();
        r.insert(
            Stat::LongestPageTitle,
            Normalized::Scalar(Scalar::Text("Café Müller".into())),
        );
        assert_eq!(
            render("longest_title", &r, 10),
            vec!["At an impressive 11 characters long, \"Café Müller\" is the Wikipedia page with the longest title."]
        );
    }

    #[test]
    fn single_character_examples_are_head_and_tail() {
        let mut r = Results::default();
        count(&mut r, Stat::SingleCharacterTitlesCount, 5);
        r.insert(Stat::SingleCharacterTitles, titles(&["Z", "Y", "X", "B", "A"]));
        assert_eq!(
            render("single_character_titles", &r, 1_000),
            vec!["There are 5 Wikipedia pages (0.500% of all pages) whose titles are a single character long, including \"Z\", \"Y\", and \"A\"."]
        );
    }

    #[test]
    fn single_character_degrades_with_short_list() {
        let mut r = Results::default();
        count(&mut r, Stat::SingleCharacterTitlesCount, 1);
        r.insert(Stat::SingleCharacterTitles, Normalized::Scalar(Scalar::Text("Q".into())));
        assert_eq!(
            render("single_character_titles", &r, 1_000),
            vec!["There is 1 Wikipedia page (0.100% of all pages) whose title is a single character long, including \"Q\"."]
        );

        count(&mut r, Stat::SingleCharacterTitlesCount, 0);
        r.insert(Stat::SingleCharacterTitles, titles(&[]));
        assert_eq!(
            render("single_character_titles", &r, 1_000),
            vec!["There are 0 Wikipedia pages (0.000% of all pages) whose titles are a single character long."]
        );
    }

    #[test]
    fn longest_without_spaces_labels_ranks() {
        let mut r = Results::default();
        r.insert(
            Stat::LongestPageTitlesWithNoSpaces,
            titles(&["Supercalifragilistic", "Antidisestablishment"]),
        );
        let facts = render("longest_titles_without_spaces", &r, 10);
        assert_eq!(facts.len(), 2);
        assert!(facts[0].ends_with("with the longest title containing no spaces."));
        assert!(facts[1].ends_with("with the second-longest title containing no spaces."));
        assert!(facts[0].starts_with("At 20 characters long, \"Supercalifragilistic\""));
    }

    #[test]
    fn ranked_facts_stop_at_list_length() {
        let mut r = Results::default();
        r.insert(
            Stat::PagesWithMostOutgoingLinks,
            ranked(&[("A", 3000), ("B", 2000), ("C", 1000)]),
        );
        let facts = render("most_outgoing_links", &r, 10);
        assert_eq!(
            facts,
            vec![
                "\"A\" is the Wikipedia page with the most outgoing links (3,000).",
                "\"B\" is the Wikipedia page with the second most outgoing links (2,000).",
                "\"C\" is the Wikipedia page with the third most outgoing links (1,000).",
            ]
        );
    }

    #[test]
    fn incoming_ranking_uses_all_five_ordinals() {
        let mut r = Results::default();
        r.insert(
            Stat::PagesWithMostIncomingLinks,
            ranked(&[("A", 5), ("B", 4), ("C", 3), ("D", 2), ("E", 1)]),
        );
        let facts = render("most_incoming_links", &r, 10);
        assert_eq!(facts.len(), 5);
        assert_eq!(
            facts[4],
            "\"E\" is the fifth most linked-to page on Wikipedia (1 incoming link)."
        );
    }

    #[test]
    fn singular_counts_agree() {
        let mut r = Results::default();
        for stat in Stat::ALL {
            count(&mut r, stat, 1);
        }
        count(&mut r, Stat::PagesWithNoOutgoingLinksCount, 0);
        count(&mut r, Stat::PagesWithNoIncomingLinksCount, 0);
        r.insert(Stat::LongestPageTitle, Normalized::Scalar(Scalar::Text("X".into())));
        r.insert(Stat::LongestPageTitlesWithNoSpaces, titles(&["X"]));
        r.insert(Stat::SingleCharacterTitles, titles(&["X"]));
        r.insert(Stat::PagesWithMostIncomingLinks, ranked(&[("X", 1)]));

        let expected = [
            ("total_pages", "Wikipedia contains 1 page."),
            ("total_links", "There is a total of 1 link between Wikipedia pages."),
            (
                "total_redirects",
                "1 Wikipedia page is actually just a redirect to another page.",
            ),
            (
                "no_links",
                "1 Wikipedia page (100.000% of all pages) has no incoming or outgoing links.",
            ),
            (
                "no_outgoing_links",
                "There is 1 Wikipedia page (100.00% of all pages) which does not link to any other pages.",
            ),
            (
                "no_incoming_links",
                "There is 1 Wikipedia page (100.00% of all pages) which is not linked to from any other pages.",
            ),
            (
                "longest_title",
                "At an impressive 1 character long, \"X\" is the Wikipedia page with the longest title.",
            ),
            (
                "single_character_titles",
                "There is 1 Wikipedia page (100.000% of all pages) whose title is a single character long, including \"X\".",
            ),
            (
                "longest_titles_without_spaces",
                "At 1 character long, \"X\" is the Wikipedia page with the longest title containing no spaces.",
            ),
            (
                "starting_with_exclamation_mark",
                "Only 1 Wikipedia page starts with an exclamation mark.",
            ),
            (
                "containing_exclamation_mark",
                "1 Wikipedia page (100.00%) has a title containing an exclamation mark.",
            ),
            (
                "starting_with_question_mark",
                "Only 1 Wikipedia page starts with a question mark.",
            ),
            (
                "containing_question_mark",
                "1 Wikipedia page (100.00%) has a title containing a question mark.",
            ),
            (
                "containing_spaces",
                "1 Wikipedia page (100.0%) has a title containing a space.",
            ),
            (
                "containing_no_spaces",
                "1 Wikipedia page (100.0%) has a title containing no spaces.",
            ),
            (
                "containing_quotation_mark",
                "Quotation marks appear in the title of 1 Wikipedia page (100.00% of all pages), causing innumerable parsing headaches.",
            ),
            (
                "most_incoming_links",
                "\"X\" is the most linked-to page on Wikipedia (1 incoming link).",
            ),
        ];
        for (template, sentence) in expected {
            assert_eq!(render(template, &r, 1), vec![sentence], "{}", template);
        }
    }

    #[test]
    fn plural_picks_form() {
        assert_eq!(plural(0, "page", "pages"), "pages");
        assert_eq!(plural(1, "page", "pages"), "page");
        assert_eq!(plural(2, "page", "pages"), "pages");
    }

    #[test]
    fn quoted_list_joins() {
        let s = |v: &[&str]| v.iter().map(|x| x.to_string()).collect::<Vec<_>>();
        assert_eq!(quoted_list(&s(&[])), "");
        assert_eq!(quoted_list(&s(&["a"])), "\"a\"");
        assert_eq!(quoted_list(&s(&["a", "b"])), "\"a\" and \"b\"");
        assert_eq!(quoted_list(&s(&["a", "b", "c"])), "\"a\", \"b\", and \"c\"");
    }

    #[test]
    fn templates_only_read_registered_stats() {
        for t in TEMPLATES {
            assert!(!t.inputs.is_empty(), "{} declares no inputs", t.name);
            for input in t.inputs {
                assert!(Stat::ALL.contains(input));
            }
        }
    }
}
