/// The single dashboard page. Charts are drawn by Plotly from the figure
/// JSON served at `/api/dashboard`. The two selects are the only filter
/// state; every change posts both of them to `/api/filter`.
pub const DASHBOARD_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Interactive Dashboard</title>
    <script src="https://cdn.plot.ly/plotly-2.35.2.min.js" charset="utf-8"></script>
    <style>
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            margin: 0;
            padding: 0 20px;
        }
        h1 {
            text-align: center;
        }
        .filters {
            display: flex;
            justify-content: center;
            margin-bottom: 20px;
        }
        .filters select {
            width: 45%;
            padding: 6px;
        }
        .filters select + select {
            margin-left: 10px;
        }
        .names {
            margin: 20px auto;
            width: 80%;
            padding: 10px;
            border: 1px solid #ccc;
            border-radius: 8px;
            max-height: 300px;
            overflow-y: scroll;
            background-color: #f9f9f9;
        }
    </style>
</head>
<body>
    <h1>Interactive Dashboard</h1>

    <div class="filters">
        <select id="enslaver_filter" data-control="enslaver">
            <option value="" disabled selected>Select an Enslaver</option>
        </select>
        <select id="data_source_filter" data-control="data_source">
            <option value="" disabled selected>Select a Data Source</option>
        </select>
    </div>

    <div id="bar_chart"></div>
    <div id="doughnut_chart"></div>
    <div id="age_bubble_chart"></div>

    <div id="enslaved_names_list" class="names"></div>

    <script>
        const enslaverSelect = () => document.getElementById('enslaver_filter');
        const sourceSelect = () => document.getElementById('data_source_filter');

        function fillSelect(select, values) {
            for (const value of values) {
                const opt = document.createElement('option');
                opt.value = value;
                opt.textContent = value;
                select.appendChild(opt);
            }
        }

        // A null selection shows the placeholder unless "All" was picked.
        function syncSelect(select, value) {
            if (value !== null) {
                select.value = value;
            } else if (select.value !== 'All') {
                select.value = '';
            }
        }

        function currentSelection() {
            return {
                enslaver: enslaverSelect().value || null,
                data_source: sourceSelect().value || null,
            };
        }

        function render(view) {
            syncSelect(enslaverSelect(), view.selection.enslaver);
            syncSelect(sourceSelect(), view.selection.data_source);

            const a = view.artifacts;
            Plotly.react('bar_chart', a.enslaver_chart.data, a.enslaver_chart.layout);
            Plotly.react('doughnut_chart', a.descriptor_chart.data, a.descriptor_chart.layout);
            Plotly.react('age_bubble_chart', a.age_group_chart.data, a.age_group_chart.layout);

            const panel = document.getElementById('enslaved_names_list');
            panel.replaceChildren();
            const heading = document.createElement('h4');
            heading.textContent = a.names.heading;
            panel.appendChild(heading);
            for (const name of a.names.names) {
                const p = document.createElement('p');
                p.textContent = name;
                panel.appendChild(p);
            }
        }

        async function onChange() {
            const res = await fetch('/api/filter', {
                method: 'POST',
                headers: { 'Content-Type': 'application/json' },
                body: JSON.stringify(currentSelection()),
            });
            if (res.ok) {
                render(await res.json());
            } else {
                console.error('Filter update failed:', res.status);
            }
        }

        async function init() {
            try {
                const [options, view] = await Promise.all([
                    fetch('/api/options').then(r => r.json()),
                    fetch('/api/dashboard').then(r => r.json()),
                ]);
                fillSelect(enslaverSelect(), options.enslavers);
                fillSelect(sourceSelect(), options.data_sources);
                enslaverSelect().addEventListener('change', onChange);
                sourceSelect().addEventListener('change', onChange);
                render(view);
            } catch (error) {
                console.error('Failed to load dashboard:', error);
            }
        }

        init();
    </script>
</body>
</html>
"#;
