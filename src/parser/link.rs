use crate::availability::{Availability, Copies, Limited, Ready, Reserved, Unavailable};
use crate::datetime::DateTime;
use crate::parser::ParseSettings;
use crate::xml::XmlNode;

// OPDS 1.2 availability extension
const LINK: &str = "link";
const AVAILABILITY: &str = "availability";
const HOLDS: &str = "holds";
const COPIES: &str = "copies";

const STATUS: &str = "status";
const SINCE: &str = "since";
const UNTIL: &str = "until";
const TOTAL: &str = "total";
const POSITION: &str = "position";
const AVAILABLE: &str = "available";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Status {
    Available,
    Unavailable,
    Reserved,
    Ready,
}

impl Status {
    fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "available" => Some(Self::Available),
            "unavailable" => Some(Self::Unavailable),
            "reserved" => Some(Self::Reserved),
            "ready" => Some(Self::Ready),
            _ => None,
        }
    }
}

/// Everything a link says about availability, before deciding on a variant.
struct LinkFacts {
    status: Option<Status>,
    holds_position: Option<u64>,
    holds_total: Copies,
    copies_available: Copies,
    copies_total: Copies,
    since: Option<DateTime>,
    until: Option<DateTime>,
}

impl LinkFacts {
    fn read<N: XmlNode>(link: &N) -> Self {
        let availability = link.first_child(AVAILABILITY);
        let holds = link.first_child(HOLDS);
        let copies = link.first_child(COPIES);

        let status = availability
            .and_then(|node| node.attribute(STATUS))
            .and_then(|raw| {
                let status = Status::parse(raw);
                if status.is_none() {
                    tracing::debug!(status = raw, "ignoring unrecognized availability status");
                }
                status
            });

        Self {
            status,
            holds_position: holds
                .and_then(|node| node.attribute(POSITION))
                .and_then(|raw| read_count(POSITION, raw)),
            holds_total: read_copies(holds, TOTAL),
            copies_available: read_copies(copies, AVAILABLE),
            copies_total: read_copies(copies, TOTAL),
            since: read_date(availability, SINCE),
            until: read_date(availability, UNTIL),
        }
    }
}

/// Derives an [`Availability`] from an OPDS acquisition link.
///
/// First match wins:
/// 1. Status `unavailable` → [`Availability::Unavailable`]
/// 2. A holds position of at least `1` → [`Availability::Reserved`]
/// 3. Status `available` with any known copy count, or
///    zero available copies out of a nonzero total → [`Availability::Limited`]
/// 4. Status `ready` → [`Availability::Ready`]
/// 5. Anything else → [`Availability::Unlimited`]
pub(super) fn parse_link<N: XmlNode>(link: &N, settings: &ParseSettings) -> Availability {
    if !link.is_named(LINK) {
        tracing::debug!(name = link.name(), "reading availability from a non-link element");
    }

    let mut facts = LinkFacts::read(link);

    if settings.clamp_copies
        && let (Some(available), Some(total)) =
            (facts.copies_available.get(), facts.copies_total.get())
        && available > total
    {
        tracing::debug!(available, total, "clamping available copies to total");
        facts.copies_available = Copies::new(total);
    }

    let availability = decide(facts, settings);
    tracing::trace!(kind = %availability.kind(), "derived availability from link");
    availability
}

fn decide(facts: LinkFacts, settings: &ParseSettings) -> Availability {
    let LinkFacts {
        status,
        holds_position,
        holds_total,
        copies_available,
        copies_total,
        since,
        until,
    } = facts;

    if status == Some(Status::Unavailable) {
        return Unavailable::new(holds_total, copies_available, copies_total).into();
    }

    match holds_position {
        Some(position) => match Reserved::new(
            position,
            holds_total,
            copies_available,
            copies_total,
            since,
            until,
        ) {
            Ok(reserved) => return reserved.into(),
            Err(error) => tracing::debug!(%error, "ignoring malformed holds position"),
        },
        None if status == Some(Status::Reserved) => {
            tracing::debug!("reserved status without a holds position");
        }
        None => {}
    }

    let has_counts = !copies_available.is_unknown() || !copies_total.is_unknown();
    let exhausted = copies_available.get() == Some(0)
        && copies_total.get().is_some_and(|total| total > 0);

    let is_limited = match status {
        Some(Status::Available) => has_counts,
        _ => settings.infer_from_counts && exhausted,
    };
    if is_limited {
        return Limited::new(copies_available, copies_total, since, until).into();
    }

    if status == Some(Status::Ready) {
        return Ready::new(since, until).into();
    }

    Availability::Unlimited
}

fn read_count(name: &'static str, raw: &str) -> Option<u64> {
    let count = raw.trim().parse().ok();
    if count.is_none() {
        tracing::debug!(attribute = name, value = raw, "ignoring malformed count");
    }
    count
}

fn read_copies<N: XmlNode>(node: Option<&N>, name: &'static str) -> Copies {
    node.and_then(|node| node.attribute(name))
        .and_then(|raw| read_count(name, raw))
        .map_or(Copies::UNKNOWN, Copies::new)
}

fn read_date<N: XmlNode>(node: Option<&N>, name: &'static str) -> Option<DateTime> {
    let raw = node.and_then(|node| node.attribute(name))?;
    let date = DateTime::parse(raw);
    if date.is_none() {
        tracing::debug!(attribute = name, value = raw, "ignoring malformed date");
    }
    date
}
