use criterion::{black_box, criterion_group, criterion_main, Criterion};
use http::Method;

/// The GitHub API, written with `:name` parameters.
const GITHUB: &[&str] = &[
    "/authorizations",
    "/authorizations/:p1",
    "/applications/:p1/tokens/:p2",
    "/events",
    "/repos/:p1/:p2/events",
    "/networks/:p1/:p2/events",
    "/orgs/:p1/events",
    "/users/:p1/received_events",
    "/users/:p1/received_events/public",
    "/users/:p1/events",
    "/users/:p1/events/public",
    "/users/:p1/events/orgs/:p2",
    "/feeds",
    "/notifications",
    "/repos/:p1/:p2/notifications",
    "/notifications/threads/:p1",
    "/notifications/threads/:p1/subscription",
    "/repos/:p1/:p2/stargazers",
    "/users/:p1/starred",
    "/user/starred",
    "/user/starred/:p1/:p2",
    "/repos/:p1/:p2/subscribers",
    "/users/:p1/subscriptions",
    "/user/subscriptions",
    "/repos/:p1/:p2/subscription",
    "/user/subscriptions/:p1/:p2",
    "/users/:p1/gists",
    "/gists",
    "/gists/:p1",
    "/gists/:p1/star",
    "/repos/:p1/:p2/git/blobs/:p3",
    "/repos/:p1/:p2/git/commits/:p3",
    "/repos/:p1/:p2/git/refs",
    "/repos/:p1/:p2/git/tags/:p3",
    "/repos/:p1/:p2/git/trees/:p3",
    "/issues",
    "/user/issues",
    "/orgs/:p1/issues",
    "/repos/:p1/:p2/issues",
    "/repos/:p1/:p2/issues/:p3",
    "/repos/:p1/:p2/assignees",
    "/repos/:p1/:p2/assignees/:p3",
    "/repos/:p1/:p2/issues/:p3/comments",
    "/repos/:p1/:p2/issues/:p3/events",
    "/repos/:p1/:p2/labels",
    "/repos/:p1/:p2/labels/:p3",
    "/repos/:p1/:p2/issues/:p3/labels",
    "/repos/:p1/:p2/milestones/:p3/labels",
    "/repos/:p1/:p2/milestones/",
    "/repos/:p1/:p2/milestones/:p3",
    "/emojis",
    "/gitignore/templates",
    "/gitignore/templates/:p1",
    "/meta",
    "/rate_limit",
    "/users/:p1/orgs",
    "/user/orgs",
    "/orgs/:p1",
    "/orgs/:p1/members",
    "/orgs/:p1/members/:p2",
    "/orgs/:p1/public_members",
    "/orgs/:p1/public_members/:p2",
    "/orgs/:p1/teams",
    "/teams/:p1",
    "/teams/:p1/members",
    "/teams/:p1/members/:p2",
    "/teams/:p1/repos",
    "/teams/:p1/repos/:p2/:p3",
    "/user/teams",
    "/repos/:p1/:p2/pulls",
    "/repos/:p1/:p2/pulls/:p3",
    "/repos/:p1/:p2/pulls/:p3/commits",
    "/repos/:p1/:p2/pulls/:p3/files",
    "/repos/:p1/:p2/pulls/:p3/merge",
    "/repos/:p1/:p2/pulls/:p3/comments",
    "/user/repos",
    "/users/:p1/repos",
    "/orgs/:p1/repos",
    "/repositories",
    "/repos/:p1/:p2",
    "/repos/:p1/:p2/contributors",
    "/repos/:p1/:p2/languages",
    "/repos/:p1/:p2/teams",
    "/repos/:p1/:p2/tags",
    "/repos/:p1/:p2/branches",
    "/repos/:p1/:p2/branches/:p3",
    "/repos/:p1/:p2/collaborators",
    "/repos/:p1/:p2/collaborators/:p3",
    "/repos/:p1/:p2/comments",
    "/repos/:p1/:p2/commits/:p3/comments",
    "/repos/:p1/:p2/commits",
    "/repos/:p1/:p2/commits/:p3",
    "/repos/:p1/:p2/readme",
    "/repos/:p1/:p2/keys",
    "/repos/:p1/:p2/keys/:p3",
    "/repos/:p1/:p2/downloads",
    "/repos/:p1/:p2/downloads/:p3",
    "/repos/:p1/:p2/forks",
    "/repos/:p1/:p2/hooks",
    "/repos/:p1/:p2/hooks/:p3",
    "/repos/:p1/:p2/releases",
    "/repos/:p1/:p2/releases/:p3",
    "/repos/:p1/:p2/releases/:p3/assets",
    "/repos/:p1/:p2/stats/contributors",
    "/repos/:p1/:p2/stats/commit_activity",
    "/repos/:p1/:p2/stats/code_frequency",
    "/repos/:p1/:p2/stats/participation",
    "/repos/:p1/:p2/stats/punch_card",
    "/repos/:p1/:p2/statuses/:p3",
    "/search/repositories",
    "/search/code",
    "/search/issues",
    "/search/users",
    "/legacy/issues/search/:p1/:p2/:p3/:p4",
    "/legacy/repos/search/:p1",
    "/legacy/user/search/:p1",
    "/legacy/user/email/:p1",
    "/users/:p1",
    "/user",
    "/users",
    "/user/emails",
    "/users/:p1/followers",
    "/user/followers",
    "/users/:p1/following",
    "/user/following",
    "/user/following/:p1",
    "/users/:p1/following/:p2",
    "/users/:p1/keys",
    "/user/keys",
    "/user/keys/:p1",
];

/// Rewrites every `:pN` segment of the GitHub routes.
fn routes(param: impl Fn(&str) -> String) -> Vec<String> {
    GITHUB
        .iter()
        .map(|route| {
            route
                .split('/')
                .map(|segment| match segment.strip_prefix(':') {
                    Some(name) => param(name),
                    None => segment.to_owned(),
                })
                .collect::<Vec<_>>()
                .join("/")
        })
        .collect()
}

fn compare_routers(c: &mut Criterion) {
    let mut group = c.benchmark_group("Compare Routers");

    let paths = routes(str::to_owned);
    let brackets = routes(|name| format!("{{{}}}", name));

    let mut tree = routetree::Node::new();
    for route in GITHUB {
        tree.insert(*route, true).unwrap();
    }
    group.bench_function("routetree", |b| {
        b.iter(|| {
            for path in black_box(&paths) {
                let result = black_box(tree.at(path).unwrap());
                assert!(*result.value);
            }
        });
    });

    let mut path_tree = path_tree::PathTree::new();
    for route in GITHUB {
        let _ = path_tree.insert(route, true);
    }
    group.bench_function("path-tree", |b| {
        b.iter(|| {
            for path in black_box(&paths) {
                let result = black_box(path_tree.find(path).unwrap());
                assert!(*result.0);
            }
        });
    });

    let registered = brackets.iter().map(String::as_str).collect::<Vec<_>>();
    let gonzales = gonzales::RouterBuilder::new().build(registered.clone());
    group.bench_function("gonzales", |b| {
        b.iter(|| {
            for path in black_box(&paths) {
                let result = black_box(gonzales.route(path.as_str()).unwrap());
                assert!(registered.get(result.get_index()).is_some());
            }
        });
    });

    let mut actix = actix_router::Router::<bool>::build();
    for route in &brackets {
        actix.path(route.as_str(), true);
    }
    let actix = actix.finish();
    group.bench_function("actix", |b| {
        b.iter(|| {
            for path in black_box(&paths) {
                let mut path = actix_router::Path::new(path.as_str());
                let result = black_box(actix.recognize(&mut path).unwrap());
                assert!(*result.0);
            }
        });
    });

    let regex_set = regex::RegexSet::new(routes(|_| "(.*)".to_owned())).unwrap();
    group.bench_function("regex", |b| {
        b.iter(|| {
            for path in black_box(&paths) {
                let result = black_box(regex_set.matches(path));
                assert!(result.matched_any());
            }
        });
    });

    let mut route_recognizer = route_recognizer::Router::new();
    for route in GITHUB {
        route_recognizer.add(route, true);
    }
    group.bench_function("route-recognizer", |b| {
        b.iter(|| {
            for path in black_box(&paths) {
                let result = black_box(route_recognizer.recognize(path).unwrap());
                assert!(**result.handler());
            }
        });
    });

    let mut routefinder = routefinder::Router::new();
    for route in GITHUB {
        routefinder.add(*route, true).unwrap();
    }
    group.bench_function("routefinder", |b| {
        b.iter(|| {
            for path in black_box(&paths) {
                let result = black_box(routefinder.best_match(path).unwrap());
                assert!(*result.handler());
            }
        });
    });

    group.finish();
}

fn dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("Dispatch");

    let mut router = routetree::Router::new();
    for route in GITHUB {
        router.get(route, true);
    }

    let paths = routes(str::to_owned);
    group.bench_function("matched", |b| {
        b.iter(|| {
            for path in black_box(&paths) {
                let result = black_box(router.dispatch(&Method::GET, path));
                assert!(matches!(result, routetree::Dispatch::Matched(_)));
            }
        });
    });

    // every path misses and is fixed by the case-insensitive walk
    let upper = paths.iter().map(|path| path.to_uppercase()).collect::<Vec<_>>();
    group.bench_function("fixed path redirect", |b| {
        b.iter(|| {
            for path in black_box(&upper) {
                let result = black_box(router.dispatch(&Method::GET, path));
                assert!(matches!(result, routetree::Dispatch::Redirect { .. }));
            }
        });
    });

    let escaped = routes(|name| format!("%7E{}", name));
    router.unescape_path_values = true;
    group.bench_function("unescaped", |b| {
        b.iter(|| {
            for path in black_box(&escaped) {
                let result = black_box(router.dispatch(&Method::GET, path));
                assert!(matches!(result, routetree::Dispatch::Matched(_)));
            }
        });
    });

    group.finish();
}

criterion_group!(benches, compare_routers, dispatch);
criterion_main!(benches);
