//! Registry of the read-only analytical queries run against a snapshot.
//!
//! Every statistic the report needs has exactly one variant here. Titles are
//! stored with `_` in place of spaces, so "contains a space" means
//! `INSTR(title, '_') > 0`.

use std::fmt;

/// Row layout a query is expected to produce before normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// One row, one numeric column.
    Count,
    /// At most one row, one text column.
    Title,
    /// Any number of rows, one text column each.
    Titles,
    /// Any number of `(title, count)` rows.
    Ranked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Stat {
    NonRedirectPagesCount,
    LinksCount,
    RedirectsCount,
    PagesWithMostOutgoingLinks,
    PagesWithMostIncomingLinks,
    FirstPageAlphabetically,
    LastPageAlphabetically,
    PagesWithNoLinksCount,
    PagesWithNoOutgoingLinksCount,
    PagesWithNoIncomingLinksCount,
    LongestPageTitle,
    LongestPageTitlesWithNoSpaces,
    SingleCharacterTitles,
    SingleCharacterTitlesCount,
    TitlesStartingWithExclamationMarkCount,
    TitlesContainingExclamationMarkCount,
    TitlesStartingWithQuestionMarkCount,
    TitlesContainingQuestionMarkCount,
    TitlesContainingSpacesCount,
    TitlesContainingNoSpacesCount,
    TitlesContainingQuotationMarkCount,
}

impl Stat {
    /// Registry order. The total page count comes first since every
    /// percentage divides by it.
    pub const ALL: [Stat; 21] = [
        Stat::NonRedirectPagesCount,
        Stat::LinksCount,
        Stat::RedirectsCount,
        Stat::PagesWithMostOutgoingLinks,
        Stat::PagesWithMostIncomingLinks,
        Stat::FirstPageAlphabetically,
        Stat::LastPageAlphabetically,
        Stat::PagesWithNoLinksCount,
        Stat::PagesWithNoOutgoingLinksCount,
        Stat::PagesWithNoIncomingLinksCount,
        Stat::LongestPageTitle,
        Stat::LongestPageTitlesWithNoSpaces,
        Stat::SingleCharacterTitles,
        Stat::SingleCharacterTitlesCount,
        Stat::TitlesStartingWithExclamationMarkCount,
        Stat::TitlesContainingExclamationMarkCount,
        Stat::TitlesStartingWithQuestionMarkCount,
        Stat::TitlesContainingQuestionMarkCount,
        Stat::TitlesContainingSpacesCount,
        Stat::TitlesContainingNoSpacesCount,
        Stat::TitlesContainingQuotationMarkCount,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Stat::NonRedirectPagesCount => "non_redirect_pages_count",
            Stat::LinksCount => "links_count",
            Stat::RedirectsCount => "redirects_count",
            Stat::PagesWithMostOutgoingLinks => "pages_with_most_outgoing_links",
            Stat::PagesWithMostIncomingLinks => "pages_with_most_incoming_links",
            Stat::FirstPageAlphabetically => "first_article_sorted_alphabetically",
            Stat::LastPageAlphabetically => "last_article_sorted_alphabetically",
            Stat::PagesWithNoLinksCount => "pages_with_no_incoming_or_outgoing_links_count",
            Stat::PagesWithNoOutgoingLinksCount => "pages_with_no_outgoing_links_count",
            Stat::PagesWithNoIncomingLinksCount => "pages_with_no_incoming_links_count",
            Stat::LongestPageTitle => "longest_page_title",
            Stat::LongestPageTitlesWithNoSpaces => "longest_page_titles_with_no_spaces",
            Stat::SingleCharacterTitles => "pages_with_single_character_title",
            Stat::SingleCharacterTitlesCount => "pages_with_single_character_title_count",
            Stat::TitlesStartingWithExclamationMarkCount => {
                "page_titles_starting_with_exclamation_mark_count"
            }
            Stat::TitlesContainingExclamationMarkCount => {
                "page_titles_containing_exclamation_mark_count"
            }
            Stat::TitlesStartingWithQuestionMarkCount => {
                "page_titles_starting_with_question_mark_count"
            }
            Stat::TitlesContainingQuestionMarkCount => "page_titles_containing_question_mark_count",
            Stat::TitlesContainingSpacesCount => "page_titles_containing_spaces_count",
            Stat::TitlesContainingNoSpacesCount => "page_titles_containing_no_spaces_count",
            Stat::TitlesContainingQuotationMarkCount => {
                "page_titles_containing_quotation_mark_count"
            }
        }
    }

    pub fn shape(self) -> Shape {
        match self {
            Stat::PagesWithMostOutgoingLinks | Stat::PagesWithMostIncomingLinks => Shape::Ranked,
            Stat::FirstPageAlphabetically | Stat::LastPageAlphabetically | Stat::LongestPageTitle => {
                Shape::Title
            }
            Stat::LongestPageTitlesWithNoSpaces | Stat::SingleCharacterTitles => Shape::Titles,
            _ => Shape::Count,
        }
    }

    pub fn sql(self) -> &'static str {
        match self {
            Stat::NonRedirectPagesCount => {
                "SELECT COUNT(*)
                 FROM pages
                 WHERE is_redirect = 0"
            }
            Stat::LinksCount => {
                "SELECT SUM(outgoing_links_count)
                 FROM links"
            }
            Stat::RedirectsCount => "SELECT COUNT(*) FROM redirects",
            Stat::PagesWithMostOutgoingLinks => {
                "SELECT title, outgoing_links_count
                 FROM links
                 INNER JOIN pages ON links.id = pages.id
                 ORDER BY links.outgoing_links_count DESC
                 LIMIT 5"
            }
            Stat::PagesWithMostIncomingLinks => {
                "SELECT title, incoming_links_count
                 FROM links
                 INNER JOIN pages ON links.id = pages.id
                 ORDER BY links.incoming_links_count DESC
                 LIMIT 5"
            }
            Stat::FirstPageAlphabetically => {
                "SELECT title
                 FROM pages
                 WHERE is_redirect = 0
                 ORDER BY title ASC
                 LIMIT 1"
            }
            Stat::LastPageAlphabetically => {
                "SELECT title
                 FROM pages
                 WHERE is_redirect = 0
                 ORDER BY title DESC
                 LIMIT 1"
            }
            // Pages without a links row. Disjoint from the two counts below,
            // which only look at pages that do have a links row.
            Stat::PagesWithNoLinksCount => {
                "SELECT COUNT(*)
                 FROM pages
                 LEFT JOIN links ON pages.id = links.id
                 WHERE is_redirect = 0
                   AND links.id IS NULL"
            }
            Stat::PagesWithNoOutgoingLinksCount => {
                "SELECT COUNT(*)
                 FROM links
                 WHERE outgoing_links_count = 0"
            }
            Stat::PagesWithNoIncomingLinksCount => {
                "SELECT COUNT(*)
                 FROM links
                 WHERE incoming_links_count = 0"
            }
            Stat::LongestPageTitle => {
                "SELECT title
                 FROM pages
                 WHERE is_redirect = 0
                 ORDER BY LENGTH(title) DESC
                 LIMIT 1"
            }
            Stat::LongestPageTitlesWithNoSpaces => {
                "SELECT title
                 FROM pages
                 WHERE is_redirect = 0
                   AND INSTR(title, '_') = 0
                 ORDER BY LENGTH(title) DESC
                 LIMIT 3"
            }
            Stat::SingleCharacterTitles => {
                "SELECT title
                 FROM pages
                 WHERE is_redirect = 0
                   AND LENGTH(title) = 1
                 ORDER BY title DESC"
            }
            Stat::SingleCharacterTitlesCount => {
                "SELECT COUNT(*)
                 FROM pages
                 WHERE is_redirect = 0
                   AND LENGTH(title) = 1"
            }
            Stat::TitlesStartingWithExclamationMarkCount => {
                "SELECT COUNT(*)
                 FROM pages
                 WHERE is_redirect = 0
                   AND title LIKE '!%'"
            }
            Stat::TitlesContainingExclamationMarkCount => {
                "SELECT COUNT(*)
                 FROM pages
                 WHERE is_redirect = 0
                   AND INSTR(title, '!') > 0"
            }
            Stat::TitlesStartingWithQuestionMarkCount => {
                "SELECT COUNT(*)
                 FROM pages
                 WHERE is_redirect = 0
                   AND title LIKE '?%'"
            }
            Stat::TitlesContainingQuestionMarkCount => {
                "SELECT COUNT(*)
                 FROM pages
                 WHERE is_redirect = 0
                   AND INSTR(title, '?') > 0"
            }
            Stat::TitlesContainingSpacesCount => {
                "SELECT COUNT(*)
                 FROM pages
                 WHERE is_redirect = 0
                   AND INSTR(title, '_') > 0"
            }
            Stat::TitlesContainingNoSpacesCount => {
                "SELECT COUNT(*)
                 FROM pages
                 WHERE is_redirect = 0
                   AND INSTR(title, '_') = 0"
            }
            // Straight and curly quotes count the same.
            Stat::TitlesContainingQuotationMarkCount => {
                "SELECT COUNT(*)
                 FROM pages
                 WHERE is_redirect = 0
                   AND (INSTR(title, '\"') > 0
                        OR INSTR(title, '''') > 0
                        OR INSTR(title, '‘') > 0
                        OR INSTR(title, '’') > 0
                        OR INSTR(title, '“') > 0
                        OR INSTR(title, '”') > 0)"
            }
        }
    }
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
