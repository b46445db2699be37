//! Public site renderer.
//!
//! Stateless composition of the marketing sections (hero, about,
//! services, media, testimonials, contact) from a content snapshot.
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML
//! templating; gallery images go through the storage render endpoint
//! with width breakpoints so browsers pick an appropriate size.

use maud::{DOCTYPE, Markup, PreEscaped, html};

use soundcheck_api::storage::{render_url, srcset};
use soundcheck_core::model::{Mix, Photo, Platform, Testimonial, Venue};
use soundcheck_core::store::ContentSnapshot;

const CSS: &str = include_str!("../../static/style.css");

/// Width breakpoints for gallery srcsets.
const GALLERY_WIDTHS: [u32; 4] = [480, 768, 1024, 1440];
const RENDER_QUALITY: u8 = 75;

/// Render the whole single-page site.
pub fn render_site(snapshot: &ContentSnapshot) -> String {
    let markup = html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { "DJ Kurt | Island Events & Weddings" }
                meta name="description" content="Professional DJ for weddings, corporate events, and private parties across the island.";
                style { (PreEscaped(CSS)) }
            }
            body {
                (header())
                main {
                    (hero())
                    (about())
                    (services())
                    (media(snapshot))
                    (testimonials(&snapshot.testimonials, &snapshot.venues))
                    (contact())
                }
                (footer())
            }
        }
    };
    markup.into_string()
}

fn header() -> Markup {
    html! {
        header .site-header {
            a .brand href="#top" { "DJ Kurt" }
            nav {
                a href="#about" { "About" }
                a href="#services" { "Services" }
                a href="#media" { "Media" }
                a href="#testimonials" { "Testimonials" }
                a href="#contact" { "Book Now" }
            }
        }
    }
}

fn hero() -> Markup {
    html! {
        section #top .hero {
            h1 { "Unforgettable Island Celebrations" }
            p .tagline { "Weddings, corporate events, and private parties with a soundtrack to match the view." }
            a .cta href="#contact" { "Check availability" }
        }
    }
}

fn about() -> Markup {
    html! {
        section #about .about {
            h2 { "About" }
            p {
                "Over a decade behind the decks at beachfront ceremonies, resort "
                "ballrooms, and sunset receptions. Every event gets a custom set "
                "built around your crowd, from first dance to last call."
            }
        }
    }
}

fn services() -> Markup {
    html! {
        section #services .services {
            h2 { "Services" }
            ul {
                li { strong { "Weddings" } " — ceremony sound, reception DJ, MC duties" }
                li { strong { "Corporate" } " — product launches, galas, award nights" }
                li { strong { "Private parties" } " — birthdays, anniversaries, club nights" }
            }
        }
    }
}

fn media(snapshot: &ContentSnapshot) -> Markup {
    let video = &snapshot.video;
    html! {
        section #media .media {
            h2 { "Media" }
            div .featured-video {
                a href=(video.url) {
                    img src=(video.poster_image) alt=(video.title) loading="lazy";
                    span .play-label { (video.title) }
                }
                p { (video.description) }
            }
            @if !snapshot.photos.is_empty() {
                div .gallery {
                    @for photo in &snapshot.photos {
                        (gallery_item(photo))
                    }
                }
            }
            @if !snapshot.mixes.is_empty() {
                div .mixes {
                    h3 { "Listen" }
                    @for mix in &snapshot.mixes {
                        (mix_card(mix))
                    }
                }
            }
        }
    }
}

fn gallery_item(photo: &Photo) -> Markup {
    html! {
        figure .gallery-item {
            img src=(render_url(&photo.url, 1024, RENDER_QUALITY))
                srcset=(srcset(&photo.url, &GALLERY_WIDTHS, RENDER_QUALITY))
                sizes="(max-width: 768px) 100vw, 33vw"
                alt=(photo.alt)
                loading="lazy"
                decoding="async";
        }
    }
}

fn mix_card(mix: &Mix) -> Markup {
    let platform_label = match mix.platform {
        Platform::Spotify => "Listen on Spotify",
        Platform::Mixcloud => "Listen on Mixcloud",
    };
    html! {
        article .mix-card {
            h4 { (mix.title) }
            @if let Some(description) = &mix.description {
                p { (description) }
            }
            a href=(mix.embed_url) rel="noopener" { (platform_label) }
        }
    }
}

fn testimonials(testimonials: &[Testimonial], venues: &[Venue]) -> Markup {
    html! {
        section #testimonials .testimonials {
            h2 { "Testimonials" }
            @for testimonial in testimonials {
                (testimonial_card(testimonial))
            }
            @if !venues.is_empty() {
                div .venues {
                    h3 { "Venues played" }
                    ul .venue-strip {
                        @for venue in venues {
                            li {
                                @if let Some(logo) = &venue.logo {
                                    img src=(logo) alt=(venue.name) loading="lazy";
                                } @else {
                                    span { (venue.name) }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn testimonial_card(testimonial: &Testimonial) -> Markup {
    html! {
        blockquote .testimonial {
            p { (testimonial.text) }
            footer {
                @if let Some(image) = &testimonial.image {
                    img .portrait src=(image) alt=(testimonial.name) loading="lazy";
                }
                cite { (testimonial.name) " — " (testimonial.event) }
                span .stars aria-label=(format!("{} out of 5 stars", testimonial.rating.stars())) {
                    ("★".repeat(usize::from(testimonial.rating.stars())))
                }
            }
        }
    }
}

fn contact() -> Markup {
    html! {
        section #contact .contact {
            h2 { "Book Your Event" }
            form method="post" action="/api/v1/contact" {
                label { "Name" input type="text" name="name" required; }
                label { "Email" input type="email" name="email" required; }
                label { "Phone" input type="tel" name="phone"; }
                label { "Event type"
                    select name="eventType" {
                        option value="wedding" { "Wedding" }
                        option value="corporate" { "Corporate" }
                        option value="birthday" { "Birthday" }
                        option value="club" { "Club" }
                        option value="private" { "Private party" }
                        option value="other" selected { "Other" }
                    }
                }
                label { "Event date" input type="date" name="eventDate"; }
                label { "Message" textarea name="message" rows="5" required {} }
                button type="submit" { "Send inquiry" }
            }
        }
    }
}

fn footer() -> Markup {
    html! {
        footer .site-footer {
            p { "Bookings across the island and beyond. Mahalo for listening." }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use soundcheck_core::model::{EntityId, Rating};

    fn snapshot() -> ContentSnapshot {
        ContentSnapshot {
            photos: vec![Photo {
                id: EntityId::from(1),
                url: "https://backend.example.com/storage/v1/object/public/photos/a.jpg".into(),
                alt: "Sunset first dance".into(),
                display_order: 0,
            }],
            mixes: vec![Mix {
                id: EntityId::from(2),
                title: "Sunset Sessions".into(),
                embed_url: "https://open.spotify.com/playlist/x".into(),
                platform: Platform::Spotify,
                description: None,
            }],
            testimonials: vec![Testimonial {
                id: EntityId::from(3),
                name: "Leilani".into(),
                event: "Wedding".into(),
                text: "Dance floor never emptied.".into(),
                rating: Rating::new(5).unwrap(),
                image: None,
            }],
            ..ContentSnapshot::default()
        }
    }

    #[test]
    fn renders_every_section() {
        let html = render_site(&snapshot());
        for anchor in ["id=\"top\"", "id=\"about\"", "id=\"services\"", "id=\"media\"", "id=\"testimonials\"", "id=\"contact\""] {
            assert!(html.contains(anchor), "missing section anchor {anchor}");
        }
    }

    #[test]
    fn gallery_uses_render_endpoint_srcset() {
        let html = render_site(&snapshot());
        assert!(html.contains("/storage/v1/render/image/public/photos/a.jpg"));
        assert!(html.contains("480w"));
        assert!(html.contains("alt=\"Sunset first dance\""));
    }

    #[test]
    fn testimonial_escapes_markup() {
        let mut snap = snapshot();
        snap.testimonials[0].text = "<script>alert(1)</script>".into();
        let html = render_site(&snap);
        assert!(!html.contains("<script>alert(1)</script>"));
    }

    #[test]
    fn empty_snapshot_still_renders() {
        let html = render_site(&ContentSnapshot::default());
        assert!(html.contains("Book Your Event"));
        assert!(!html.contains("venue-strip"));
    }
}
