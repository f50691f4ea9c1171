use dynamic_connectivity::{ConnectivityGraph, UndirectedEdge};

fn add_edge(graph: &mut ConnectivityGraph, u: usize, v: usize) {
    println!("Adding edge between {} and {}", u, v);
    graph.add_edge(UndirectedEdge::new(u, v));
}

fn delete_edge(graph: &mut ConnectivityGraph, u: usize, v: usize) {
    println!("Deleting edge between {} and {}", u, v);
    graph.delete_edge(UndirectedEdge::new(u, v));
}

fn query(graph: &ConnectivityGraph, u: usize, v: usize) {
    println!(
        "Are {} and {} connected? {}",
        u,
        v,
        if graph.is_connected(u, v) { "Yes" } else { "No" }
    );
}

fn main() {
    let mut graph = ConnectivityGraph::new(10);
    for u in 0..9 {
        add_edge(&mut graph, u, u + 1);
    }
    println!("Created a path on vertices 0 to 9");
    query(&graph, 0, 9);
    add_edge(&mut graph, 2, 7);
    delete_edge(&mut graph, 4, 5);
    query(&graph, 0, 9);
    println!(
        "Size of 0's component: {}",
        graph.size_of_connected_component(0)
    );
    delete_edge(&mut graph, 2, 7);
    query(&graph, 0, 9);
    query(&graph, 5, 9);
}
