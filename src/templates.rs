use axum::http::StatusCode;
use maud::{DOCTYPE, Markup, html};

use crate::{
    csrf::CSRF_FIELD,
    entities::movie,
    forms::{AddForm, FormErrors, RateForm},
    models::SearchHit,
};

const TAILWIND_CDN: &str = "https://cdn.tailwindcss.com";

const INPUT_CLASS: &str = "mt-2 w-full rounded-md border border-gray-300 px-3 py-2 focus:border-blue-500 focus:outline-none focus:ring-1 focus:ring-blue-500";
const BUTTON_CLASS: &str =
    "w-full rounded-md bg-blue-600 px-4 py-2 font-semibold text-white hover:bg-blue-700";

pub fn index_page(movies: &[movie::Model]) -> String {
    page(
        "My Top Movies",
        html! {
            div class="max-w-4xl mx-auto px-6 py-12" {
                div class="flex items-start justify-between gap-6" {
                    div {
                        h1 class="text-3xl font-bold text-gray-900" { "My Top Movies" }
                        p class="mt-2 text-gray-600" { "These are my all-time favourite movies." }
                    }
                    a class="rounded-md bg-blue-600 px-4 py-2 font-semibold text-white hover:bg-blue-700" href="/add" { "Add Movie" }
                }

                @if movies.is_empty() {
                    div class="mt-10 bg-white shadow rounded-lg p-8" {
                        p class="text-gray-600" { "No movies yet. Add one to start your ranking." }
                    }
                } @else {
                    div class="mt-10 space-y-4" {
                        @for m in movies {
                            (movie_card(m))
                        }
                    }
                }
            }
        },
    )
}

pub fn add_page(form: &AddForm, csrf_token: &str, errors: &FormErrors) -> String {
    page(
        "Add Movie",
        html! {
            div class="max-w-2xl mx-auto px-6 py-12" {
                div class="bg-white shadow rounded-lg p-8" {
                    h1 class="text-3xl font-bold text-gray-900" { "Add a Movie" }

                    form class="mt-8 space-y-6" method="post" action="/add" novalidate {
                        (csrf_input(csrf_token, errors))
                        div {
                            label class="block text-sm font-medium text-gray-700" for="title_query" { "Movie title" }
                            input class=(INPUT_CLASS) name="title_query" id="title_query" value=(form.title_query) required;
                            (field_errors(errors, "title_query"))
                        }
                        button class=(BUTTON_CLASS) type="submit" { "Add movie" }
                    }
                }
            }
        },
    )
}

pub fn select_page(query: &str, hits: &[SearchHit]) -> String {
    page(
        "Select Movie",
        html! {
            div class="max-w-2xl mx-auto px-6 py-12" {
                div class="bg-white shadow rounded-lg p-8" {
                    h1 class="text-3xl font-bold text-gray-900" { "Select Movie" }
                    p class="mt-2 text-gray-600" { "Results for \u{201c}" (query) "\u{201d}" }

                    @if hits.is_empty() {
                        p class="mt-6 text-gray-600" { "No movies matched." }
                    } @else {
                        ul class="mt-6 divide-y divide-gray-200" {
                            @for hit in hits {
                                li class="py-3" {
                                    a class="text-blue-600 hover:text-blue-800" href=(format!("/select?movie_id={}", hit.tmdb_id)) {
                                        (hit.title)
                                        @if let Some(year) = hit.year { " - " (year) }
                                    }
                                }
                            }
                        }
                    }
                    a class="mt-6 inline-block text-sm text-blue-600 hover:text-blue-800" href="/add" { "New search" }
                }
            }
        },
    )
}

pub fn update_page(
    movie: &movie::Model,
    form: &RateForm,
    csrf_token: &str,
    errors: &FormErrors,
) -> String {
    page(
        "Edit Movie",
        html! {
            div class="max-w-2xl mx-auto px-6 py-12" {
                div class="bg-white shadow rounded-lg p-8" {
                    h1 class="text-3xl font-bold text-gray-900" { (movie.title) }
                    p class="mt-2 text-gray-600" { "Edit Movie Rating" }

                    form class="mt-8 space-y-6" method="post" action=(format!("/update?movie_id={}", movie.id)) novalidate {
                        (csrf_input(csrf_token, errors))
                        div {
                            label class="block text-sm font-medium text-gray-700" for="rating" { "Your rating out of 10 (e.g. 7.5)" }
                            input class=(INPUT_CLASS) name="rating" id="rating" inputmode="decimal" value=(form.rating) required;
                            (field_errors(errors, "rating"))
                        }
                        div {
                            label class="block text-sm font-medium text-gray-700" for="review" { "Your review" }
                            textarea class=(INPUT_CLASS) name="review" id="review" rows="3" required { (form.review) }
                            (field_errors(errors, "review"))
                        }
                        button class=(BUTTON_CLASS) type="submit" { "Done" }
                    }
                }
            }
        },
    )
}

pub fn error_page(status: StatusCode, message: String) -> String {
    page(
        "Error",
        html! {
            div class="min-h-screen bg-gray-50 flex items-center justify-center" {
                div class="max-w-xl w-full px-6" {
                    div class="bg-white shadow rounded-lg p-8" {
                        h1 class="text-2xl font-bold text-gray-900" { "Error " (status.as_u16()) }
                        p class="mt-4 text-gray-700" { (message) }
                        a class="mt-6 inline-block text-blue-600 hover:text-blue-800" href="/" { "Back" }
                    }
                }
            }
        },
    )
}

fn page(title: &str, body: Markup) -> String {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                script src=(TAILWIND_CDN) {}
            }
            body class="bg-gray-50" { (body) }
        }
    }
    .into_string()
}

fn movie_card(m: &movie::Model) -> Markup {
    html! {
        div class="bg-white shadow rounded-lg p-6 flex gap-6" {
            @if !m.img_url.is_empty() {
                img class="w-24 rounded" src=(m.img_url) alt=(m.title);
            }
            div class="flex-1" {
                div class="flex items-start justify-between gap-4" {
                    h2 class="text-xl font-semibold text-gray-900" {
                        @if let Some(rank) = m.ranking {
                            span class="mr-2 text-gray-400" { "#" (rank) }
                        }
                        (m.title)
                        span class="ml-2 font-normal text-gray-500" { "(" (m.year) ")" }
                    }
                    @if let Some(rating) = m.rating {
                        span class="text-lg font-semibold text-yellow-600" { (format!("{rating}")) }
                    }
                }
                @if let Some(review) = m.review.as_deref().filter(|r| !r.is_empty()) {
                    p class="mt-2 italic text-gray-700" { "\u{201c}" (review) "\u{201d}" }
                }
                p class="mt-2 text-sm text-gray-600" { (m.description) }
                div class="mt-4 flex gap-4 text-sm" {
                    a class="text-blue-600 hover:text-blue-800" href=(format!("/update?movie_id={}", m.id)) { "Update" }
                    a class="text-red-600 hover:text-red-800" href=(format!("/delete?movie_id={}", m.id)) { "Delete" }
                }
            }
        }
    }
}

fn csrf_input(token: &str, errors: &FormErrors) -> Markup {
    html! {
        input type="hidden" name=(CSRF_FIELD) value=(token);
        (field_errors(errors, CSRF_FIELD))
    }
}

fn field_errors(errors: &FormErrors, field: &str) -> Markup {
    html! {
        @for err in errors.field(field) {
            p class="mt-2 text-sm text-red-600" { (err.to_string()) }
        }
    }
}
